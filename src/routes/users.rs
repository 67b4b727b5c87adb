//! User directory endpoints
//!
//! - `POST /users/register` - Register a user
//! - `GET /users/all` - List users

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::db::schemas::UserDoc;
use crate::routes::{
    error_response, json_response, not_found_response, ok_response, read_json_body, FullBody,
};
use crate::server::AppState;
use crate::services::users::validate_new_user;
use crate::types::ValidationErrorResponse;

/// Dispatch for /users/* routes
pub async fn handle_users_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<FullBody> {
    let method = req.method().clone();
    let subpath = path.strip_prefix("/users").unwrap_or("");

    match (method, subpath) {
        (Method::POST, "/register") => handle_register(req, state).await,
        (Method::GET, "/all") => handle_list_users(state).await,
        _ => not_found_response(),
    }
}

/// POST /users/register
async fn handle_register(req: Request<Incoming>, state: Arc<AppState>) -> Response<FullBody> {
    let user: UserDoc = match read_json_body(req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let errors = validate_new_user(&user);
    if !errors.is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ValidationErrorResponse::new(errors),
        );
    }

    match state.users.register(user).await {
        Ok(created) => ok_response(StatusCode::CREATED, created, "User registered successfully"),
        Err(e) => error_response(e),
    }
}

/// GET /users/all
async fn handle_list_users(state: Arc<AppState>) -> Response<FullBody> {
    match state.users.list_users().await {
        Ok(users) => ok_response(StatusCode::OK, users, "Users fetched successfully"),
        Err(e) => error_response(e),
    }
}
