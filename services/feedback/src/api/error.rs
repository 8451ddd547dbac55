//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every endpoint returns the
//! same `{status: "error", code, message}` shape.
//!
//! # Key invariants and assumptions
//! - `code` is stable (`validation_error`, `internal`); `message` is for humans.
//! - Status codes align with the error category.
//!
//! # Security considerations
//! - Internal errors log details server-side but return generic messages.
use crate::api::types::{ErrorResponse, STATUS_ERROR};
use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use feedback_analyzer::AnalyzerError;

/// Structured API error returned by handlers.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use feedback::api::error::api_validation_error;
///
/// let err = api_validation_error("name, email and feedback required");
/// assert_eq!(err.status, StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            status: STATUS_ERROR.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        },
    }
}

/// Build a 400 Bad Request validation error.
pub fn api_validation_error(message: &str) -> ApiError {
    error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Build a 500 Internal Server Error from a store error.
///
/// Logs the store error and counts it; the client only sees `message`.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "feedback storage error");
    metrics::counter!("feedback_store_errors_total").increment(1);
    error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

/// Build a 500 Internal Server Error from an analyzer failure.
pub fn api_analyzer_failure(err: &AnalyzerError) -> ApiError {
    tracing::error!(error = %err, "text analysis failed");
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "failed to analyze feedback",
    )
}
