//! Error types for the sponsicore backend

use hyper::StatusCode;

/// Main error type for service operations
///
/// Every public service operation returns this instead of panicking or
/// letting store errors escape. The route layer translates it into the
/// response envelope; messages are written to be client-visible as-is.
#[derive(Debug, thiserror::Error)]
pub enum SponsicoreError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Config(String),
}

impl SponsicoreError {
    /// Convert error to HTTP status code
    ///
    /// Domain failures (including wrapped store failures) stay in the 4xx
    /// range so the envelope `status=false` contract holds for API clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Implement From conversions for common error types

impl From<std::io::Error> for SponsicoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SponsicoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<hyper::Error> for SponsicoreError {
    fn from(err: hyper::Error) -> Self {
        Self::Internal(format!("HTTP error: {}", err))
    }
}

impl From<mongodb::error::Error> for SponsicoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, SponsicoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_failures_map_to_4xx() {
        assert_eq!(
            SponsicoreError::NotFound("Task not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SponsicoreError::Conflict("already exists".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SponsicoreError::Database("insert failed".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn error_message_is_client_visible_verbatim() {
        let err = SponsicoreError::NotFound("Task not found".into());
        assert_eq!(err.to_string(), "Task not found");
    }
}
