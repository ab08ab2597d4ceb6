//! Error handling - every failure renders as `{ "error", "message" }` JSON.

use actix_web::error::PathError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_core::error::RepoError;
use blog_shared::ErrorResponse;
use std::fmt;

const URL_NOT_FOUND: &str = "The requested URL was not found on the server.";

/// Application-level error type that converts to structured JSON responses.
#[derive(Debug)]
pub enum AppError {
    /// Rejected input. `category` names the validation rule that failed.
    BadRequest {
        category: &'static str,
        message: String,
    },
    NotFound(String),
    Forbidden(String),
    MethodNotAllowed,
    PayloadTooLarge,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest { category, message } => {
                write!(f, "Bad request ({}): {}", category, message)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::PayloadTooLarge => write!(f, "Payload too large"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest { category, message } => {
                ErrorResponse::bad_request(category, message)
            }
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::MethodNotAllowed => ErrorResponse::method_not_allowed(),
            AppError::PayloadTooLarge => ErrorResponse::payload_too_large(),
            AppError::Internal(detail) => {
                // Detail stays in the logs, never in the response body
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::MissingFields(_) => AppError::BadRequest {
                category: "MissingFields",
                message,
            },
            DomainError::EmptyTitle => AppError::BadRequest {
                category: "EmptyTitle",
                message,
            },
            DomainError::InvalidAuthorId => AppError::BadRequest {
                category: "InvalidAuthorId",
                message,
            },
            DomainError::MalformedBody => AppError::BadRequest {
                category: "MalformedBody",
                message,
            },
            DomainError::NotFound { .. } => AppError::NotFound(message),
            DomainError::Forbidden { .. } => AppError::Forbidden(message),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            // Another request removed the row between lookup and write
            RepoError::NotFound => AppError::NotFound("Post not found.".to_string()),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Path segments that fail to parse (`/posts/abc`) are unknown URLs.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), "Rejected path: {}", err);
    AppError::NotFound(URL_NOT_FOUND.to_string()).into()
}

/// Fallback for URLs no route matches.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound(URL_NOT_FOUND.to_string()))
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
