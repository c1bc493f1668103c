//! Web Error Types
//!
//! Defines error types for the web layer and implements conversion
//! to HTTP responses with appropriate status codes.
//!
//! Dashboard pages almost never return these: per-dataset failures are
//! absorbed by the load guard and rendered as an error banner. What remains
//! is JSON endpoints and genuinely unexpected conditions.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;

/// Web layer error types
#[derive(Error, Debug)]
pub enum WebError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The analytics backend rejected or failed a call
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            WebError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            WebError::Backend(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            WebError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "web error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for web handlers
pub type WebResult<T> = Result<T, WebError>;
