//! User document schema

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for users
pub const USER_COLLECTION: &str = "Users";

/// User document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Business id ("U-01"), assigned at registration if absent
    #[serde(default)]
    pub user_id: Option<String>,

    /// Display name (required, max 100 chars)
    #[serde(default)]
    pub name: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "userId": 1 },
            Some(IndexOptions::builder().name("user_id_index".to_string()).build()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_fields_are_camel_case() {
        let user = UserDoc {
            id: None,
            user_id: Some("U-01".to_string()),
            name: "Eleanor Pena".to_string(),
            avatar_url: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userId"], "U-01");
        assert_eq!(json["name"], "Eleanor Pena");
        assert!(json["avatarUrl"].is_null());
        assert!(json.get("_id").is_none());
    }
}
