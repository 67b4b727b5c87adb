//! Project registry service

use bson::doc;

use crate::db::schemas::{ProjectDoc, PROJECT_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::services::wrap_store;
use crate::types::{Result, SponsicoreError};

#[derive(Clone)]
pub struct ProjectService {
    projects: MongoCollection<ProjectDoc>,
}

impl ProjectService {
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            projects: mongo.collection(PROJECT_COLLECTION).await?,
        })
    }

    /// Create a project; a duplicate business id is a domain conflict
    pub async fn create_project(&self, mut project: ProjectDoc) -> Result<ProjectDoc> {
        let project_id = project.project_id.clone().unwrap_or_default();

        let existing = self
            .projects
            .find_one(doc! { "projectId": &project_id })
            .await
            .map_err(|e| wrap_store("Failed to create project", e))?;
        if existing.is_some() {
            return Err(duplicate_project(&project_id));
        }

        project.id = None;
        let id = match self.projects.insert_one(&project).await {
            Ok(id) => id,
            // The unique index catches the race the lookup cannot: two
            // concurrent creates both passing the check above.
            Err(SponsicoreError::Database(msg)) if is_duplicate_key(&msg) => {
                return Err(duplicate_project(&project_id));
            }
            Err(e) => return Err(wrap_store("Failed to create project", e)),
        };
        project.id = Some(id);

        Ok(project)
    }

    /// All projects, unfiltered
    pub async fn list_projects(&self) -> Result<Vec<ProjectDoc>> {
        self.projects
            .find_many(doc! {})
            .await
            .map_err(|e| wrap_store("Failed to retrieve projects", e))
    }
}

fn duplicate_project(project_id: &str) -> SponsicoreError {
    SponsicoreError::Conflict(format!("Project with ID {} already exists", project_id))
}

fn is_duplicate_key(msg: &str) -> bool {
    msg.contains("E11000") || msg.contains("duplicate key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_the_project() {
        let err = duplicate_project("P1");
        assert_eq!(err.to_string(), "Project with ID P1 already exists");
        assert!(matches!(err, SponsicoreError::Conflict(_)));
    }

    #[test]
    fn duplicate_key_errors_are_recognized() {
        assert!(is_duplicate_key(
            "Insert failed: E11000 duplicate key error collection: sponsicore.Projects"
        ));
        assert!(!is_duplicate_key("Insert failed: connection reset"));
    }
}
