use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{normalize_body, normalize_title};

/// Post entity - a text post owned by a caller-asserted author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

/// Mutations that require the caller to own the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Edit,
    Delete,
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostAction::Edit => write!(f, "edit"),
            PostAction::Delete => write!(f, "delete"),
        }
    }
}

impl Post {
    /// Check that `author_id` matches the stored owner before `action` proceeds.
    pub fn ensure_owned_by(&self, author_id: i64, action: PostAction) -> Result<(), DomainError> {
        if self.author_id != author_id {
            return Err(DomainError::Forbidden { action });
        }
        Ok(())
    }

    /// Replace title and body. The post is left untouched when the new title is blank.
    pub fn revise(&mut self, title: &str, body: &str) -> Result<(), DomainError> {
        let title = normalize_title(title)?;
        self.title = title;
        self.body = normalize_body(body);
        Ok(())
    }
}

/// A post that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

impl NewPost {
    /// Trim the inputs and reject a blank title.
    pub fn new(author_id: i64, title: &str, body: &str) -> Result<Self, DomainError> {
        Ok(Self {
            author_id,
            title: normalize_title(title)?,
            body: normalize_body(body),
        })
    }

    /// Attach the id assigned by storage.
    pub fn with_id(self, id: i64) -> Post {
        Post {
            id,
            author_id: self.author_id,
            title: self.title,
            body: self.body,
        }
    }
}
