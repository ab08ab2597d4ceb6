//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostAction;

/// Domain errors - request validation and ownership failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Every required field absent from the payload, in the order requested.
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Title cannot be empty.")]
    EmptyTitle,

    #[error("author_id must be an integer.")]
    InvalidAuthorId,

    #[error("Request body must be valid JSON.")]
    MalformedBody,

    #[error("{entity_type} not found.")]
    NotFound { entity_type: &'static str },

    #[error("You can only {action} your own posts.")]
    Forbidden { action: PostAction },
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}
