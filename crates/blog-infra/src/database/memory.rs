//! In-memory post repository - used as fallback when the database cannot be opened.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

struct PostTable {
    /// Next id to hand out. Only ever grows, so deleted ids are not reused.
    next_id: i64,
    rows: BTreeMap<i64, Post>,
}

/// In-memory post table using an ordered map with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(PostTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *row = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let post = new_post.with_id(id);
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }
}
