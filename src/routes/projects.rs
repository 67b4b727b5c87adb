//! Project registry endpoints
//!
//! - `POST /projects` - Create a project (business id must be unused)
//! - `GET /projects` - List projects

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::db::schemas::ProjectDoc;
use crate::routes::{
    error_response, not_found_response, ok_response, read_json_body, FullBody,
};
use crate::server::AppState;

/// Dispatch for /projects routes
pub async fn handle_projects_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<FullBody> {
    let method = req.method().clone();
    let subpath = path.strip_prefix("/projects").unwrap_or("");

    match (method, subpath) {
        (Method::POST, "") | (Method::POST, "/") => handle_create_project(req, state).await,
        (Method::GET, "") | (Method::GET, "/") => handle_list_projects(state).await,
        _ => not_found_response(),
    }
}

/// POST /projects
async fn handle_create_project(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<FullBody> {
    let project: ProjectDoc = match read_json_body(req).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match state.projects.create_project(project).await {
        Ok(created) => ok_response(StatusCode::OK, created, "Project created successfully"),
        Err(e) => error_response(e),
    }
}

/// GET /projects
async fn handle_list_projects(state: Arc<AppState>) -> Response<FullBody> {
    match state.projects.list_projects().await {
        Ok(projects) => ok_response(StatusCode::OK, projects, "Projects retrieved successfully"),
        Err(e) => error_response(e),
    }
}
