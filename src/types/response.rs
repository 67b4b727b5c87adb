//! Uniform API response envelope
//!
//! Every endpoint replies with `{status, message, data}`. Validation
//! failures use a distinct shape carrying per-field error lists; both
//! shapes are part of the wire contract with the existing frontend.

use serde::Serialize;
use std::collections::BTreeMap;

/// Response envelope applied to every API result
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Structured validation failure: `{status, message, errors: {field: [msgs]}}`
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub status: bool,
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorResponse {
    pub fn new(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            status: false,
            message: "Validation Failed".to_string(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_shape() {
        let resp = ApiResponse::ok(42, "Success");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], true);
        assert_eq!(json["message"], "Success");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn error_envelope_carries_null_data() {
        let resp = ApiResponse::<()>::error("Task not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["message"], "Task not found");
        assert!(json["data"].is_null());
    }

    #[test]
    fn validation_envelope_shape() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), vec!["The name field is required.".to_string()]);
        let resp = ValidationErrorResponse::new(errors);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["message"], "Validation Failed");
        assert_eq!(json["errors"]["name"][0], "The name field is required.");
    }
}
