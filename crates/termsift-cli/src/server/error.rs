//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use termsift::{FormatError, TermsiftError};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the termsift library.
    Termsift(TermsiftError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Termsift(e @ TermsiftError::Io { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
            }
            ApiError::Termsift(e) => (StatusCode::BAD_REQUEST, "termsift_error", e.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<TermsiftError> for ApiError {
    fn from(err: TermsiftError) -> Self {
        ApiError::Termsift(err)
    }
}

impl From<FormatError> for ApiError {
    fn from(err: FormatError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Termsift(e) => write!(f, "termsift error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
