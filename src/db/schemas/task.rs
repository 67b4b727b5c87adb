//! Task document schema
//!
//! The central mutable entity. Project, reporter and assignee references
//! are denormalized id+name snapshots taken at mutation time; they are
//! never synced back to their source records.

use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::mongo::IntoIndexes;

/// Collection name for tasks
pub const TASK_COLLECTION: &str = "Tasks";

/// Task document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Business id ("SC-01"), assigned at creation if absent, immutable after
    #[serde(default)]
    pub task_id: Option<String>,

    #[serde(default)]
    pub task_title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub comments: Option<Vec<Comment>>,

    /// Embedded project snapshot (id + name, not a live reference)
    #[serde(default)]
    pub project: Option<ProjectRef>,

    #[serde(default)]
    pub reporter: Option<Reporter>,

    #[serde(default)]
    pub assignees: Option<Vec<Assignee>>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub attachment: Option<String>,

    #[serde(default)]
    pub is_deleted: bool,

    #[serde(default = "now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "now")]
    pub updated_at: DateTime<Utc>,
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Embedded project reference snapshot
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub project_id: Option<String>,
    pub project_name: Option<String>,
}

/// Embedded reporter reference snapshot
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub reporter_id: Option<String>,
    pub name: Option<String>,
}

/// Embedded assignee reference snapshot
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub assignee_id: Option<String>,
    pub name: Option<String>,
}

/// Embedded task comment
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default = "now")]
    pub created_at: DateTime<Utc>,
}

/// Task workflow status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskStatus {
    InProgress,
    #[default]
    Todo,
    #[serde(rename = "NTD")]
    Ntd,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InProgress => "InProgress",
            Self::Todo => "Todo",
            Self::Ntd => "NTD",
            Self::Done => "Done",
        };
        f.write_str(name)
    }
}

/// Task priority
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        };
        f.write_str(name)
    }
}

impl IntoIndexes for TaskDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "taskId": 1 },
            Some(IndexOptions::builder().name("task_id_index".to_string()).build()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_by_variant_name() {
        assert_eq!(serde_json::to_value(TaskStatus::InProgress).unwrap(), "InProgress");
        assert_eq!(serde_json::to_value(TaskStatus::Ntd).unwrap(), "NTD");
        let parsed: TaskStatus = serde_json::from_str("\"NTD\"").unwrap();
        assert_eq!(parsed, TaskStatus::Ntd);
    }

    #[test]
    fn compound_state_string_uses_display_names() {
        let state = format!("{}|{}", TaskStatus::Todo, Priority::Low);
        assert_eq!(state, "Todo|Low");
    }

    #[test]
    fn create_body_without_server_fields_deserializes() {
        let body = serde_json::json!({
            "taskTitle": "Wire the board",
            "status": "Todo",
            "priority": "Low",
            "project": { "projectId": "P1", "projectName": "Board" }
        });
        let task: TaskDoc = serde_json::from_value(body).unwrap();
        assert_eq!(task.task_title.as_deref(), Some("Wire the board"));
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.id.is_none());
        assert!(task.task_id.is_none());
        assert!(!task.is_deleted);
    }
}
