//! Project document schema

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for projects
pub const PROJECT_COLLECTION: &str = "Projects";

/// Project document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Caller-supplied business id, unique across projects
    #[serde(default)]
    pub project_id: Option<String>,

    /// Display name
    #[serde(default)]
    pub project_name: Option<String>,
}

impl IntoIndexes for ProjectDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        // Unique index backs the create-time conflict check; the partial
        // filter keeps documents without a projectId out of the constraint.
        vec![(
            doc! { "projectId": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "projectId": { "$type": "string" } })
                    .name("project_id_unique".to_string())
                    .build(),
            ),
        )]
    }
}
