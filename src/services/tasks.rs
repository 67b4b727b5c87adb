//! Task registry service
//!
//! The central mutation path. Every create/update/delete emits a
//! human-readable activity entry describing what changed; those writes are
//! best-effort and never fail the task operation itself.

use bson::{doc, oid::ObjectId};
use chrono::Utc;
use tracing::warn;

use crate::db::schemas::{
    format_sequence_id, ActivityDoc, TaskDoc, TASK_COLLECTION, TASK_SEQUENCE,
};
use crate::db::{MongoClient, MongoCollection};
use crate::services::{wrap_store, ActivityService};
use crate::types::{Result, SponsicoreError};

/// The user performing a task mutation, recorded on its activity entries
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: String,
    pub user_name: String,
}

#[derive(Clone)]
pub struct TaskService {
    mongo: MongoClient,
    tasks: MongoCollection<TaskDoc>,
    activities: ActivityService,
}

impl TaskService {
    pub async fn new(mongo: &MongoClient, activities: ActivityService) -> Result<Self> {
        Ok(Self {
            mongo: mongo.clone(),
            tasks: mongo.collection(TASK_COLLECTION).await?,
            activities,
        })
    }

    /// Create a task, assigning an "SC-%02d" business id when absent
    pub async fn create_task(&self, mut task: TaskDoc, actor: &Actor) -> Result<TaskDoc> {
        if task.task_id.as_deref().map_or(true, str::is_empty) {
            let seq = self
                .mongo
                .next_sequence(TASK_SEQUENCE)
                .await
                .map_err(|e| wrap_store("Failed to create task", e))?;
            task.task_id = Some(format_sequence_id("SC", seq));
        }

        let now = Utc::now();
        task.created_at = now;
        task.updated_at = now;
        task.is_deleted = false;

        task.id = None;
        let id = self
            .tasks
            .insert_one(&task)
            .await
            .map_err(|e| wrap_store("Failed to create task", e))?;
        task.id = Some(id);

        let title = task.task_title.clone().unwrap_or_default();
        self.record_activity(ActivityDoc {
            id: None,
            task_id: task.task_id.clone(),
            task_title: task.task_title.clone(),
            project_id: embedded_project_id(&task),
            user_id: Some(actor.user_id.clone()),
            user_name: Some(actor.user_name.clone()),
            avatar_url: None,
            activity_title: Some("created new Task".to_string()),
            activity_description: Some(format!("Created task {}", title)),
            state_from: None,
            state_to: None,
            created_at: now,
            is_deleted: false,
        })
        .await;

        Ok(task)
    }

    /// Lookup by internal id among non-deleted tasks
    pub async fn get_task_by_id(&self, id: &str) -> Result<TaskDoc> {
        let oid = ObjectId::parse_str(id)
            .map_err(|_| SponsicoreError::NotFound("Task not found".to_string()))?;

        self.tasks
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| wrap_store("Failed to retrieve task", e))?
            .ok_or_else(|| SponsicoreError::NotFound("Task not found".to_string()))
    }

    /// All non-deleted tasks
    pub async fn get_all_tasks(&self) -> Result<Vec<TaskDoc>> {
        self.tasks
            .find_many(doc! {})
            .await
            .map_err(|e| wrap_store("Failed to retrieve tasks", e))
    }

    /// Full replace keyed by business id, with a change-diff activity entry
    ///
    /// Internal id, business id and the original creation time survive the
    /// replace; everything else is taken from the incoming task.
    pub async fn update_task(
        &self,
        task_id: &str,
        mut updated: TaskDoc,
        actor: &Actor,
    ) -> Result<TaskDoc> {
        let existing = self
            .tasks
            .find_one(doc! { "taskId": task_id })
            .await
            .map_err(|e| wrap_store("Failed to update task", e))?
            .ok_or_else(|| SponsicoreError::NotFound("Task not found".to_string()))?;
        let internal_id = existing
            .id
            .ok_or_else(|| SponsicoreError::Internal("Task document missing _id".to_string()))?;

        let changes = diff_tasks(&existing, &updated);

        updated.id = existing.id;
        updated.task_id = existing.task_id.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        updated.is_deleted = false;

        self.tasks
            .replace_one(doc! { "_id": internal_id }, &updated)
            .await
            .map_err(|e| wrap_store("Failed to update task", e))?;

        if !changes.descriptions.is_empty() {
            self.record_activity(ActivityDoc {
                id: None,
                task_id: updated.task_id.clone(),
                task_title: updated.task_title.clone(),
                project_id: embedded_project_id(&updated),
                user_id: Some(actor.user_id.clone()),
                user_name: Some(actor.user_name.clone()),
                avatar_url: None,
                activity_title: Some(changes.titles.join(", ")),
                activity_description: Some(changes.descriptions.join(", ")),
                state_from: Some(format!("{}|{}", existing.status, existing.priority)),
                state_to: Some(format!("{}|{}", updated.status, updated.priority)),
                created_at: updated.updated_at,
                is_deleted: false,
            })
            .await;
        }

        Ok(updated)
    }

    /// Flag a task deleted, returning the pre-image
    pub async fn soft_delete_task(&self, task_id: &str, actor: &Actor) -> Result<TaskDoc> {
        let task = self
            .tasks
            .find_one(doc! { "taskId": task_id })
            .await
            .map_err(|e| wrap_store("Failed to delete task", e))?
            .ok_or_else(|| SponsicoreError::NotFound("Task not found".to_string()))?;
        let internal_id = task
            .id
            .ok_or_else(|| SponsicoreError::Internal("Task document missing _id".to_string()))?;

        let now = Utc::now();
        let now_bson = bson::to_bson(&now)
            .map_err(|e| SponsicoreError::Internal(format!("Timestamp encoding failed: {}", e)))?;
        self.tasks
            .update_one(
                doc! { "_id": internal_id },
                doc! { "$set": { "isDeleted": true, "updatedAt": now_bson } },
            )
            .await
            .map_err(|e| wrap_store("Failed to delete task", e))?;

        let title = task.task_title.clone().unwrap_or_default();
        self.record_activity(ActivityDoc {
            id: None,
            task_id: task.task_id.clone(),
            task_title: task.task_title.clone(),
            project_id: embedded_project_id(&task),
            user_id: Some(actor.user_id.clone()),
            user_name: Some(actor.user_name.clone()),
            avatar_url: None,
            activity_title: Some("deleted Task".to_string()),
            activity_description: Some(format!("Deleted task {}", title)),
            state_from: None,
            state_to: None,
            created_at: now,
            is_deleted: false,
        })
        .await;

        Ok(task)
    }

    /// Non-deleted activities for a task, newest first
    pub async fn get_task_activities(&self, task_id: &str) -> Result<Vec<ActivityDoc>> {
        self.activities.get_activities_by_task_id(task_id).await
    }

    /// Best-effort audit write: a failure is logged, never surfaced
    async fn record_activity(&self, activity: ActivityDoc) {
        let task_id = activity.task_id.clone().unwrap_or_default();
        if let Err(e) = self.activities.log_activity(activity).await {
            warn!("Failed to record activity for task {}: {}", task_id, e);
        }
    }
}

fn embedded_project_id(task: &TaskDoc) -> Option<String> {
    task.project.as_ref().and_then(|p| p.project_id.clone())
}

/// Per-field change fragments for an update's activity entry
struct TaskChanges {
    descriptions: Vec<String>,
    titles: Vec<String>,
}

/// Diff the four user-visible fields of a task
///
/// Each changed field contributes one description line and one title
/// fragment; an update that changes none of them produces no activity.
fn diff_tasks(existing: &TaskDoc, updated: &TaskDoc) -> TaskChanges {
    let mut descriptions = Vec::new();
    let mut titles = Vec::new();
    let task_ref = existing.task_id.clone().unwrap_or_default();

    if existing.task_title != updated.task_title {
        descriptions.push(format!(
            "{} > {}",
            existing.task_title.clone().unwrap_or_default(),
            updated.task_title.clone().unwrap_or_default()
        ));
        titles.push("renamed the task name".to_string());
    }

    if existing.description != updated.description {
        // the description arrow carries no surrounding spaces in the feed
        descriptions.push(format!(
            "{}>{}",
            existing.description.clone().unwrap_or_default(),
            updated.description.clone().unwrap_or_default()
        ));
        titles.push("changed description".to_string());
    }

    if existing.status != updated.status {
        descriptions.push(format!("Status: {} > {}", existing.status, updated.status));
        titles.push(format!("changes status on {}", task_ref));
    }

    if existing.priority != updated.priority {
        descriptions.push(format!("Priority: {} > {}", existing.priority, updated.priority));
        titles.push(format!("changes Priority on {}", task_ref));
    }

    TaskChanges {
        descriptions,
        titles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{Priority, TaskStatus};
    use chrono::Utc;

    fn sample_task() -> TaskDoc {
        TaskDoc {
            id: None,
            task_id: Some("SC-01".to_string()),
            task_title: Some("A".to_string()),
            description: Some("first".to_string()),
            due_date: None,
            comments: None,
            project: None,
            reporter: None,
            assignees: None,
            status: TaskStatus::Todo,
            priority: Priority::Low,
            attachment: None,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn identical_tasks_produce_no_changes() {
        let task = sample_task();
        let changes = diff_tasks(&task, &task.clone());
        assert!(changes.descriptions.is_empty());
        assert!(changes.titles.is_empty());
    }

    #[test]
    fn title_change_produces_one_fragment_pair() {
        let existing = sample_task();
        let mut updated = existing.clone();
        updated.task_title = Some("B".to_string());

        let changes = diff_tasks(&existing, &updated);
        assert_eq!(changes.descriptions, vec!["A > B".to_string()]);
        assert_eq!(changes.titles, vec!["renamed the task name".to_string()]);
    }

    #[test]
    fn description_arrow_has_no_spaces() {
        let existing = sample_task();
        let mut updated = existing.clone();
        updated.description = Some("second".to_string());

        let changes = diff_tasks(&existing, &updated);
        assert_eq!(changes.descriptions, vec!["first>second".to_string()]);
        assert_eq!(changes.titles, vec!["changed description".to_string()]);
    }

    #[test]
    fn full_update_produces_all_four_fragments() {
        let existing = sample_task();
        let mut updated = existing.clone();
        updated.task_title = Some("B".to_string());
        updated.description = Some("second".to_string());
        updated.status = TaskStatus::Done;
        updated.priority = Priority::High;

        let changes = diff_tasks(&existing, &updated);
        assert_eq!(
            changes.descriptions.join(", "),
            "A > B, first>second, Status: Todo > Done, Priority: Low > High"
        );
        assert_eq!(
            changes.titles.join(", "),
            "renamed the task name, changed description, changes status on SC-01, changes Priority on SC-01"
        );

        // state strings recorded on the activity entry
        let state_from = format!("{}|{}", existing.status, existing.priority);
        let state_to = format!("{}|{}", updated.status, updated.priority);
        assert_eq!(state_from, "Todo|Low");
        assert_eq!(state_to, "Done|High");
    }

    #[test]
    fn status_only_change_skips_title_and_description_fragments() {
        let existing = sample_task();
        let mut updated = existing.clone();
        updated.status = TaskStatus::InProgress;

        let changes = diff_tasks(&existing, &updated);
        assert_eq!(changes.descriptions, vec!["Status: Todo > InProgress".to_string()]);
        assert_eq!(changes.titles, vec!["changes status on SC-01".to_string()]);
    }
}
