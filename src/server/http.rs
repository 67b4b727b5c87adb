//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Every response,
//! including preflights and errors, carries the CORS headers for the
//! configured frontend origin.

use hyper::body::Incoming;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::MongoClient;
use crate::routes::{self, FullBody};
use crate::services::{ActivityService, ProjectService, TaskService, UserService};
use crate::types::{Result, SponsicoreError};

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub activities: ActivityService,
}

impl AppState {
    /// Build all services over one Mongo connection and ensure indexes
    pub async fn new(args: Args, mongo: MongoClient) -> Result<Self> {
        let activities = ActivityService::new(&mongo).await?;
        Ok(Self {
            args,
            users: UserService::new(&mongo).await?,
            projects: ProjectService::new(&mongo).await?,
            tasks: TaskService::new(&mongo, activities.clone()).await?,
            activities,
        })
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Sponsicore listening on {} (db {})",
        state.args.listen, state.args.mongodb_db
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<FullBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let mut response = match (method, path.as_str()) {
        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        // Health check endpoints
        (Method::GET, "/health") | (Method::GET, "/healthz") => routes::health_check(),

        (Method::GET, "/version") => routes::version_info(),

        (_, p) if p == "/users" || p.starts_with("/users/") => {
            routes::handle_users_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p == "/projects" || p.starts_with("/projects/") => {
            routes::handle_projects_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p == "/tasks" || p.starts_with("/tasks/") => {
            routes::handle_tasks_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p.starts_with("/activity/") => {
            routes::handle_activity_request(req, Arc::clone(&state), &path).await
        }

        _ => routes::error_response(SponsicoreError::NotFound("Not found".to_string())),
    };

    apply_cors(&mut response, &state.args.allowed_origin);

    Ok(response)
}

/// Empty 204 for OPTIONS; apply_cors fills in the allow headers
fn preflight_response() -> Response<FullBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

fn apply_cors(response: &mut Response<FullBody>, origin: &str) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_headers_cover_the_configured_origin() {
        let mut response = preflight_response();
        apply_cors(&mut response, "http://localhost:5173");

        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[test]
    fn preflight_is_no_content() {
        assert_eq!(preflight_response().status(), StatusCode::NO_CONTENT);
    }
}
