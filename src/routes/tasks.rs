//! Task registry endpoints
//!
//! - `POST /tasks` - Create a task
//! - `GET /tasks` - List non-deleted tasks
//! - `GET /tasks/{id}` - Get one task by internal id
//! - `PUT /tasks/{id}` - Full update by business id
//! - `DELETE /tasks/{id}` - Soft delete by business id
//! - `GET /tasks/{id}/activities` - Activity feed for a task
//!
//! Mutations accept optional `userId`/`userName` query parameters naming
//! the acting user for the activity log.

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::db::schemas::TaskDoc;
use crate::routes::{
    error_response, not_found_response, ok_response, read_json_body, FullBody,
};
use crate::server::AppState;
use crate::services::Actor;

const DEFAULT_ACTOR_ID: &str = "U-01";
const DEFAULT_ACTOR_NAME: &str = "Eleanor Pena";

/// Dispatch for /tasks/* routes
pub async fn handle_tasks_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<FullBody> {
    let method = req.method().clone();
    let subpath = path.strip_prefix("/tasks").unwrap_or("").to_string();

    match (method, subpath.as_str()) {
        (Method::POST, "") | (Method::POST, "/") => handle_create_task(req, state).await,

        (Method::GET, "") | (Method::GET, "/") => handle_get_all_tasks(state).await,

        // GET /tasks/{id}/activities
        (Method::GET, p) if p.ends_with("/activities") => {
            let id = p
                .strip_prefix('/')
                .and_then(|s| s.strip_suffix("/activities"))
                .unwrap_or("");
            handle_get_task_activities(state, id).await
        }

        // GET /tasks/{id}
        (Method::GET, p) if p.matches('/').count() == 1 => {
            let id = p.trim_start_matches('/');
            handle_get_task(state, id).await
        }

        // PUT /tasks/{id}
        (Method::PUT, p) if p.matches('/').count() == 1 => {
            let id = p.trim_start_matches('/').to_string();
            handle_update_task(req, state, &id).await
        }

        // DELETE /tasks/{id}
        (Method::DELETE, p) if p.matches('/').count() == 1 => {
            let id = p.trim_start_matches('/').to_string();
            handle_delete_task(req, state, &id).await
        }

        _ => not_found_response(),
    }
}

/// POST /tasks
async fn handle_create_task(req: Request<Incoming>, state: Arc<AppState>) -> Response<FullBody> {
    let actor = actor_from_query(req.uri().query());
    let task: TaskDoc = match read_json_body(req).await {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    match state.tasks.create_task(task, &actor).await {
        Ok(created) => ok_response(StatusCode::OK, created, "Task created successfully"),
        Err(e) => error_response(e),
    }
}

/// GET /tasks/{id}
async fn handle_get_task(state: Arc<AppState>, id: &str) -> Response<FullBody> {
    match state.tasks.get_task_by_id(id).await {
        Ok(task) => ok_response(StatusCode::OK, task, "Success"),
        Err(e) => error_response(e),
    }
}

/// GET /tasks
async fn handle_get_all_tasks(state: Arc<AppState>) -> Response<FullBody> {
    match state.tasks.get_all_tasks().await {
        Ok(tasks) => ok_response(StatusCode::OK, tasks, "Success"),
        Err(e) => error_response(e),
    }
}

/// PUT /tasks/{id}
async fn handle_update_task(
    req: Request<Incoming>,
    state: Arc<AppState>,
    id: &str,
) -> Response<FullBody> {
    let actor = actor_from_query(req.uri().query());
    let task: TaskDoc = match read_json_body(req).await {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    match state.tasks.update_task(id, task, &actor).await {
        Ok(updated) => ok_response(StatusCode::OK, updated, "Task updated successfully"),
        Err(e) => error_response(e),
    }
}

/// DELETE /tasks/{id}
async fn handle_delete_task(
    req: Request<Incoming>,
    state: Arc<AppState>,
    id: &str,
) -> Response<FullBody> {
    let actor = actor_from_query(req.uri().query());

    match state.tasks.soft_delete_task(id, &actor).await {
        Ok(task) => ok_response(StatusCode::OK, task, "Task deleted successfully"),
        Err(e) => error_response(e),
    }
}

/// GET /tasks/{id}/activities
async fn handle_get_task_activities(state: Arc<AppState>, task_id: &str) -> Response<FullBody> {
    match state.tasks.get_task_activities(task_id).await {
        Ok(activities) => ok_response(StatusCode::OK, activities, "Success"),
        Err(e) => error_response(e),
    }
}

/// Resolve the acting user from query parameters, with the board's
/// default actor when none are given
fn actor_from_query(query: Option<&str>) -> Actor {
    let mut actor = Actor {
        user_id: DEFAULT_ACTOR_ID.to_string(),
        user_name: DEFAULT_ACTOR_NAME.to_string(),
    };

    if let Some(q) = query {
        for pair in q.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                let value = urlencoding::decode(value).unwrap_or_default();
                match key {
                    "userId" | "user_id" => actor.user_id = value.to_string(),
                    "userName" | "user_name" => actor.user_name = value.to_string(),
                    _ => {}
                }
            }
        }
    }

    actor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_falls_back_to_default_actor() {
        let actor = actor_from_query(None);
        assert_eq!(actor.user_id, "U-01");
        assert_eq!(actor.user_name, "Eleanor Pena");
    }

    #[test]
    fn query_parameters_override_the_default() {
        let actor = actor_from_query(Some("userId=U-07&userName=Jane%20Cooper"));
        assert_eq!(actor.user_id, "U-07");
        assert_eq!(actor.user_name, "Jane Cooper");
    }

    #[test]
    fn unrelated_parameters_are_ignored() {
        let actor = actor_from_query(Some("foo=bar&userName=Jane"));
        assert_eq!(actor.user_id, "U-01");
        assert_eq!(actor.user_name, "Jane");
    }
}
