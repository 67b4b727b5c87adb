//! Shared types: errors and the API response envelope

mod error;
mod response;

pub use error::{Result, SponsicoreError};
pub use response::{ApiResponse, ValidationErrorResponse};
