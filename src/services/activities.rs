//! Activity log service
//!
//! Owns the Activities collection. Entries arrive from task mutations and
//! from the activity API; once created they keep their task linkage and
//! creation timestamp through any later edit.

use bson::{doc, oid::ObjectId};
use chrono::Utc;

use crate::db::schemas::{ActivityDoc, ACTIVITY_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::services::wrap_store;
use crate::types::{Result, SponsicoreError};

#[derive(Clone)]
pub struct ActivityService {
    activities: MongoCollection<ActivityDoc>,
}

impl ActivityService {
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            activities: mongo.collection(ACTIVITY_COLLECTION).await?,
        })
    }

    /// Insert an activity entry, stamping its creation time
    pub async fn log_activity(&self, mut activity: ActivityDoc) -> Result<ActivityDoc> {
        activity.id = None;
        activity.is_deleted = false;
        activity.created_at = Utc::now();

        let id = self
            .activities
            .insert_one(&activity)
            .await
            .map_err(|e| wrap_store("Failed to log activity", e))?;
        activity.id = Some(id);

        Ok(activity)
    }

    /// Full replace by internal id, preserving the original id and creation time
    pub async fn update_activity(&self, id: &str, mut updated: ActivityDoc) -> Result<ActivityDoc> {
        let oid = parse_activity_id(id)?;

        let existing = self
            .activities
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| wrap_store("Failed to update activity", e))?
            .ok_or_else(|| SponsicoreError::NotFound("Activity not found".to_string()))?;

        updated.id = existing.id;
        updated.created_at = existing.created_at;
        updated.is_deleted = false;

        self.activities
            .replace_one(doc! { "_id": oid }, &updated)
            .await
            .map_err(|e| wrap_store("Failed to update activity", e))?;

        Ok(updated)
    }

    /// Non-deleted activities for a task, newest first
    pub async fn get_activities_by_task_id(&self, task_id: &str) -> Result<Vec<ActivityDoc>> {
        let mut activities = self
            .activities
            .find_many(doc! { "taskId": task_id })
            .await
            .map_err(|e| wrap_store("Failed to retrieve activities", e))?;

        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(activities)
    }

    /// Non-deleted activities for a project, newest first
    pub async fn get_activities_by_project_id(&self, project_id: &str) -> Result<Vec<ActivityDoc>> {
        let mut activities = self
            .activities
            .find_many(doc! { "projectId": project_id })
            .await
            .map_err(|e| wrap_store("Failed to retrieve activities", e))?;

        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(activities)
    }

    /// Flag an activity deleted, returning it as it was before the flag flip
    pub async fn soft_delete_activity(&self, id: &str) -> Result<ActivityDoc> {
        let oid = parse_activity_id(id)?;

        let activity = self
            .activities
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| wrap_store("Failed to delete activity", e))?
            .ok_or_else(|| SponsicoreError::NotFound("Activity not found".to_string()))?;

        self.activities
            .soft_delete(doc! { "_id": oid })
            .await
            .map_err(|e| wrap_store("Failed to delete activity", e))?;

        Ok(activity)
    }
}

/// An unparseable id can never match a document, so it reads as a miss
fn parse_activity_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| SponsicoreError::NotFound("Activity not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_reads_as_not_found() {
        let err = parse_activity_id("SC-01").unwrap_err();
        assert!(matches!(err, SponsicoreError::NotFound(_)));
        assert_eq!(err.to_string(), "Activity not found");
    }
}
