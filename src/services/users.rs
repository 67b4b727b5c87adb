//! User directory service

use bson::doc;
use std::collections::BTreeMap;

use crate::db::schemas::{format_sequence_id, UserDoc, USER_COLLECTION, USER_SEQUENCE};
use crate::db::{MongoClient, MongoCollection};
use crate::services::wrap_store;
use crate::types::Result;

/// Maximum accepted display name length
const MAX_NAME_LEN: usize = 100;

#[derive(Clone)]
pub struct UserService {
    mongo: MongoClient,
    users: MongoCollection<UserDoc>,
}

impl UserService {
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            mongo: mongo.clone(),
            users: mongo.collection(USER_COLLECTION).await?,
        })
    }

    /// Register a user, assigning a "U-%02d" business id when absent
    pub async fn register(&self, mut user: UserDoc) -> Result<UserDoc> {
        if user.user_id.as_deref().map_or(true, str::is_empty) {
            let seq = self
                .mongo
                .next_sequence(USER_SEQUENCE)
                .await
                .map_err(|e| wrap_store("Failed to register user", e))?;
            user.user_id = Some(format_sequence_id("U", seq));
        }

        user.id = None;
        let id = self
            .users
            .insert_one(&user)
            .await
            .map_err(|e| wrap_store("Failed to register user", e))?;
        user.id = Some(id);

        Ok(user)
    }

    /// All users, insertion order as stored
    pub async fn list_users(&self) -> Result<Vec<UserDoc>> {
        self.users
            .find_many(doc! {})
            .await
            .map_err(|e| wrap_store("Failed to fetch users", e))
    }
}

/// Field-level validation for a registration body
///
/// An empty map means the body is acceptable.
pub fn validate_new_user(user: &UserDoc) -> BTreeMap<String, Vec<String>> {
    let mut errors = BTreeMap::new();

    if user.name.trim().is_empty() {
        errors.insert(
            "name".to_string(),
            vec!["The name field is required.".to_string()],
        );
    } else if user.name.chars().count() > MAX_NAME_LEN {
        errors.insert(
            "name".to_string(),
            vec![format!(
                "The field name must be a string with a maximum length of {}.",
                MAX_NAME_LEN
            )],
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_named(name: &str) -> UserDoc {
        UserDoc {
            id: None,
            user_id: None,
            name: name.to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn accepts_an_ordinary_name() {
        assert!(validate_new_user(&user_named("Eleanor Pena")).is_empty());
    }

    #[test]
    fn rejects_a_missing_name() {
        let errors = validate_new_user(&user_named("  "));
        assert_eq!(errors["name"], vec!["The name field is required.".to_string()]);
    }

    #[test]
    fn rejects_an_overlong_name() {
        let errors = validate_new_user(&user_named(&"x".repeat(101)));
        assert!(errors.contains_key("name"));
        assert!(validate_new_user(&user_named(&"x".repeat(100))).is_empty());
    }
}
