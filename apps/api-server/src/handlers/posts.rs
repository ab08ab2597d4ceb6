//! Post handlers.
//!
//! Each handler runs validation, then the ownership check, then storage,
//! and shapes the result into a [`PostResponse`].

use actix_web::{HttpResponse, http::StatusCode, web};

use blog_core::DomainError;
use blog_core::domain::{NewPost, Post, PostAction};
use blog_core::ports::{BaseRepository, PostRepository};
use blog_core::validation::{self, PostSubmission};
use blog_shared::dto::PostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        body: post.body,
    }
}

fn post_list(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post_response).collect()
}

async fn load_post(state: &AppState, post_id: i64) -> AppResult<Post> {
    state.posts.find_by_id(post_id).await?.ok_or_else(|| {
        tracing::debug!(post_id, "Post not found");
        AppError::from(DomainError::NotFound {
            entity_type: "Post",
        })
    })
}

/// Body of a create or edit request. Bodies over the size limit are rejected.
fn required_body(body: Result<web::Bytes, actix_web::Error>) -> AppResult<web::Bytes> {
    body.map_err(|err| {
        let status = err.as_response_error().status_code();
        tracing::debug!(%status, "Rejected request body: {}", err);
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::from(DomainError::MalformedBody)
        }
    })
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let body = required_body(body)?;
    let payload = validation::parse_payload(&body)?;
    let submission = PostSubmission::from_payload(&payload)?;
    let new_post = NewPost::new(submission.author_id, &submission.title, &submission.body)?;

    let post = state.posts.insert(new_post).await?;
    tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /posts/{post_id}
///
/// Existence is checked before the body is read.
pub async fn edit_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: Result<web::Bytes, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = load_post(&state, post_id).await?;

    let body = required_body(body)?;
    let payload = validation::parse_payload(&body)?;
    let submission = PostSubmission::from_payload(&payload)?;
    post.ensure_owned_by(submission.author_id, PostAction::Edit)?;
    post.revise(&submission.title, &submission.body)?;

    let post = state.posts.update(post).await?;
    tracing::info!(post_id, author_id = post.author_id, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /posts/mine/{author_id}
pub async fn list_my_posts(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let author_id = path.into_inner();
    let posts = state.posts.list_by_author(author_id).await?;

    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// DELETE /posts/{post_id}
///
/// The body is optional JSON carrying `author_id`; anything undecodable,
/// including a body over the size limit, counts as an empty body.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: Result<web::Bytes, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let payload = body
        .map(|raw| validation::parse_payload_lenient(&raw))
        .unwrap_or_default();
    validation::require_fields(&payload, &["author_id"])?;
    let author_id = validation::coerce_author_id(&payload["author_id"])?;

    let post = load_post(&state, post_id).await?;
    post.ensure_owned_by(author_id, PostAction::Delete)?;

    state.posts.delete(post.id).await?;
    tracing::info!(post_id, author_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// GET /posts
pub async fn list_all_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;

    Ok(HttpResponse::Ok().json(post_list(posts)))
}
