//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use ems_usecase::UseCaseError;

/// Error codes carried in the `code` field of error bodies.
///
/// Each code maps to one HTTP status via [`ApiError::status`].
pub mod error_codes {
    /// Employee with the requested id does not exist (404).
    pub const NOT_FOUND: &str = "not_found";
    /// Malformed JSON, missing field or bad path parameter (400).
    pub const VALIDATION_ERROR: &str = "validation_error";
    /// Request body exceeds the configured limit (413).
    pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
    /// Store failure or any other unexpected error (500).
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// JSON error body: `{"code": "...", "message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(error_codes::NOT_FOUND, message)
    }

    /// Creates a validation error (400).
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::VALIDATION_ERROR, message)
    }

    /// Creates a payload too large error (413).
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(error_codes::PAYLOAD_TOO_LARGE, message)
    }

    /// Creates an internal error (500).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            error_codes::NOT_FOUND => StatusCode::NOT_FOUND,
            error_codes::VALIDATION_ERROR => StatusCode::BAD_REQUEST,
            error_codes::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        match err {
            UseCaseError::NotFound { .. } => ApiError::not_found(err.to_string()),
            UseCaseError::Repository(ref source) => {
                error!(error = %source, "Employee store failure");
                ApiError::internal_error(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ems_domain::{EmployeeId, RepositoryError};

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::validation_error("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::payload_too_large("x").status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::internal_error("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::new("something_else", "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_use_case_error() {
        let not_found = ApiError::from(UseCaseError::NotFound {
            id: EmployeeId::new(5),
        });
        assert_eq!(not_found.code, error_codes::NOT_FOUND);
        assert_eq!(not_found.message, "Employee not found: 5");

        let internal = ApiError::from(UseCaseError::Repository(RepositoryError::persistence(
            "disk full",
        )));
        assert_eq!(internal.code, error_codes::INTERNAL_ERROR);
    }
}
