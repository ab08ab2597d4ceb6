//! Data Transfer Objects - response types for the API.

use serde::{Deserialize, Serialize};

/// A post as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
}
