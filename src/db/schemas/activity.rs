//! Activity document schema
//!
//! Human-readable audit entries tied to a task and/or project. Produced by
//! task mutations and directly through the activity API; soft-deletable but
//! otherwise append-only.

use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for activities
pub const ACTIVITY_COLLECTION: &str = "Activities";

/// Activity document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Business id of the task this entry describes
    #[serde(default)]
    pub task_id: Option<String>,

    /// Task title snapshot at the time of the event
    #[serde(default)]
    pub task_title: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    /// Acting user
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Short event label, e.g. "renamed the task name"
    #[serde(default)]
    pub activity_title: Option<String>,

    /// Human-readable change text
    #[serde(default)]
    pub activity_description: Option<String>,

    /// Compound "status|priority" string before the change
    #[serde(default)]
    pub state_from: Option<String>,

    /// Compound "status|priority" string after the change
    #[serde(default)]
    pub state_to: Option<String>,

    #[serde(default = "now")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub is_deleted: bool,
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

impl IntoIndexes for ActivityDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (
                doc! { "taskId": 1, "createdAt": -1 },
                Some(IndexOptions::builder().name("task_created_index".to_string()).build()),
            ),
            (
                doc! { "projectId": 1, "createdAt": -1 },
                Some(IndexOptions::builder().name("project_created_index".to_string()).build()),
            ),
        ]
    }
}
