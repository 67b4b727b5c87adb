//! HTTP route handlers
//!
//! Each module owns one path prefix and dispatches on `(method, subpath)`.
//! Handlers translate service results into the response envelope; this is
//! the only layer that turns errors into status codes.

pub mod activities;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

pub use activities::handle_activity_request;
pub use health::{health_check, version_info};
pub use projects::handle_projects_request;
pub use tasks::handle_tasks_request;
pub use users::handle_users_request;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{ApiResponse, SponsicoreError};

pub(crate) type FullBody = Full<Bytes>;

/// Serialize a body as a JSON response
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<FullBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap()
}

/// Success envelope with an endpoint-specific message
pub(crate) fn ok_response<T: Serialize>(
    status: StatusCode,
    data: T,
    message: &str,
) -> Response<FullBody> {
    json_response(status, &ApiResponse::ok(data, message))
}

/// Failure envelope; the error decides the status code
pub(crate) fn error_response(err: SponsicoreError) -> Response<FullBody> {
    json_response(err.status_code(), &ApiResponse::<()>::error(err.to_string()))
}

/// Unknown path under a handled prefix
pub(crate) fn not_found_response() -> Response<FullBody> {
    error_response(SponsicoreError::NotFound("Not found".to_string()))
}

/// Read and parse a JSON request body, or produce the failure response
pub(crate) async fn read_json_body<T: DeserializeOwned>(
    req: Request<Incoming>,
) -> Result<T, Response<FullBody>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return Err(error_response(SponsicoreError::BadRequest(format!(
                "Failed to read request body: {}",
                e
            ))))
        }
    };

    serde_json::from_slice(&body).map_err(|e| {
        error_response(SponsicoreError::BadRequest(format!("Invalid JSON: {}", e)))
    })
}
