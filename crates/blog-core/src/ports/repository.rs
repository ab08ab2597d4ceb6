use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Generic repository trait defining the operations shared by every table.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist the mutated fields of an already-loaded entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository. Listings are ordered by descending id, newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a validated post and return it with its storage-assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Post>, RepoError>;

    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;
}
