//! Error types for the deal gate service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Gate Error Enum ==
/// Unified error type for the deal gate service.
#[derive(Error, Debug)]
pub enum GateError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Cached entry has expired
    #[error("Key expired: {0}")]
    Expired(String),

    /// User exceeded the request quota for the current window
    #[error("Rate limited: user {0}")]
    RateLimited(i64),

    /// Link points at a host no supported platform claims
    #[error("Unsupported product link: {0}")]
    UnsupportedLink(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = match &self {
            GateError::NotFound(_) => StatusCode::NOT_FOUND,
            GateError::Expired(_) => StatusCode::NOT_FOUND,
            GateError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            GateError::UnsupportedLink(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GateError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the deal gate service.
pub type Result<T> = std::result::Result<T, GateError>;
