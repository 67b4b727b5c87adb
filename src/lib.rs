//! Sponsicore - task tracking backend
//!
//! REST backend for a project/task board: users, projects, tasks with
//! soft deletion, and a derived activity log written on task mutations.
//! MongoDB holds all collections; responses use a uniform
//! `{status, message, data}` envelope.

pub mod config;
pub mod db;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{Result, SponsicoreError};
