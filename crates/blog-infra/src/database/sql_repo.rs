//! SQLite repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::sql_base::{SqlBaseRepository, query_error};

/// SQLite post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(post_id = model.id, "Inserted post row");
        Ok(model.into())
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(author_id, "Listing posts by author");

        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
