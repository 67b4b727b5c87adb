//! Database schemas
//!
//! MongoDB document structures for the four collections (Users, Projects,
//! Tasks, Activities) plus the sequence counters backing business ids.

mod activity;
mod counter;
mod project;
mod task;
mod user;

pub use activity::{ActivityDoc, ACTIVITY_COLLECTION};
pub use counter::{format_sequence_id, CounterDoc, COUNTER_COLLECTION, TASK_SEQUENCE, USER_SEQUENCE};
pub use project::{ProjectDoc, PROJECT_COLLECTION};
pub use task::{
    Assignee, Comment, Priority, ProjectRef, Reporter, TaskDoc, TaskStatus, TASK_COLLECTION,
};
pub use user::{UserDoc, USER_COLLECTION};
