//! Structured error bodies.

use serde::{Deserialize, Serialize};

/// Error body returned for every failed request.
///
/// `error` names the failure category, `message` describes this occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(category: &str, detail: impl Into<String>) -> Self {
        Self::new(category, detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new("Forbidden", detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("NotFound", detail)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            "MethodNotAllowed",
            "The method is not allowed for the requested URL.",
        )
    }

    pub fn payload_too_large() -> Self {
        Self::new(
            "PayloadTooLarge",
            "The request body exceeds the size limit.",
        )
    }

    pub fn internal_error() -> Self {
        Self::new("InternalError", "An unexpected error occurred.")
    }
}
