//! Error codes shared by every layer.
//!
//! DESIGN
//! ======
//! Each error enum implements [`ErrorCode`] so the HTTP layer can turn any of
//! them into the same JSON error body without knowing the concrete type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// ERROR BODY
// =============================================================================

/// JSON error payload returned by the API routes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ErrorBody {
    pub fn from_error(err: &impl ErrorCode) -> Self {
        Self { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }

    /// Pair the body with a status code as an Axum response.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
