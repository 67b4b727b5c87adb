//! Business logic services
//!
//! One service per collection. Every public operation returns the crate
//! `Result`; store failures are wrapped with a caller-facing context
//! message and nothing panics or escapes past a service boundary.

pub mod activities;
pub mod projects;
pub mod tasks;
pub mod users;

pub use activities::ActivityService;
pub use projects::ProjectService;
pub use tasks::{Actor, TaskService};
pub use users::UserService;

use crate::types::SponsicoreError;

/// Prefix a store failure with operation context, leaving domain errors alone
pub(crate) fn wrap_store(context: &str, err: SponsicoreError) -> SponsicoreError {
    match err {
        SponsicoreError::Database(msg) => {
            SponsicoreError::Database(format!("{}: {}", context, msg))
        }
        other => other,
    }
}
