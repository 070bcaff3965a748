/// Unified error types for the Skillpath records service
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the records service
#[derive(Error, Debug)]
pub enum RecordsError {
    /// A required request field is absent or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request used a verb other than the one the endpoint accepts
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The object-store write failed (network, auth, quota)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error body returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Convert RecordsError to HTTP response
impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            RecordsError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            RecordsError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                None,
            ),
            RecordsError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
                Some(msg),
            ),
            RecordsError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded".to_string(),
                None,
            ),
            RecordsError::Config(_) | RecordsError::Internal(_) | RecordsError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(), // Don't leak details
                None,
            ),
        };

        let body = Json(ErrorBody { error, details });

        (status, body).into_response()
    }
}

/// Result type alias for records service operations
pub type RecordsResult<T> = Result<T, RecordsError>;
