//! Activity log endpoints
//!
//! - `GET /activity/task/{taskId}` - Activities for a task
//! - `GET /activity/project/{projectId}` - Activities for a project
//! - `PUT /activity/{id}` - Update an entry's content
//! - `DELETE /activity/{id}` - Soft delete an entry

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::db::schemas::ActivityDoc;
use crate::routes::{
    error_response, not_found_response, ok_response, read_json_body, FullBody,
};
use crate::server::AppState;

/// Dispatch for /activity/* routes
pub async fn handle_activity_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<FullBody> {
    let method = req.method().clone();
    let subpath = path.strip_prefix("/activity").unwrap_or("").to_string();

    match (method, subpath.as_str()) {
        // GET /activity/task/{taskId}
        (Method::GET, p) if p.starts_with("/task/") => {
            let task_id = p.strip_prefix("/task/").unwrap_or("");
            handle_by_task(state, task_id).await
        }

        // GET /activity/project/{projectId}
        (Method::GET, p) if p.starts_with("/project/") => {
            let project_id = p.strip_prefix("/project/").unwrap_or("");
            handle_by_project(state, project_id).await
        }

        // PUT /activity/{id}
        (Method::PUT, p) if p.matches('/').count() == 1 => {
            let id = p.trim_start_matches('/').to_string();
            handle_update(req, state, &id).await
        }

        // DELETE /activity/{id}
        (Method::DELETE, p) if p.matches('/').count() == 1 => {
            let id = p.trim_start_matches('/');
            handle_soft_delete(state, id).await
        }

        _ => not_found_response(),
    }
}

async fn handle_by_task(state: Arc<AppState>, task_id: &str) -> Response<FullBody> {
    match state.activities.get_activities_by_task_id(task_id).await {
        Ok(activities) => ok_response(StatusCode::OK, activities, "Success"),
        Err(e) => error_response(e),
    }
}

async fn handle_by_project(state: Arc<AppState>, project_id: &str) -> Response<FullBody> {
    match state.activities.get_activities_by_project_id(project_id).await {
        Ok(activities) => ok_response(StatusCode::OK, activities, "Success"),
        Err(e) => error_response(e),
    }
}

async fn handle_update(
    req: Request<Incoming>,
    state: Arc<AppState>,
    id: &str,
) -> Response<FullBody> {
    let activity: ActivityDoc = match read_json_body(req).await {
        Ok(a) => a,
        Err(resp) => return resp,
    };

    match state.activities.update_activity(id, activity).await {
        Ok(updated) => ok_response(StatusCode::OK, updated, "Activity updated successfully"),
        Err(e) => error_response(e),
    }
}

async fn handle_soft_delete(state: Arc<AppState>, id: &str) -> Response<FullBody> {
    match state.activities.soft_delete_activity(id).await {
        Ok(activity) => ok_response(StatusCode::OK, activity, "Activity deleted successfully"),
        Err(e) => error_response(e),
    }
}
