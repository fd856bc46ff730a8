use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostWithAuthor};
use crate::domain::validation::parse_id;
use crate::presentation::AppState;
use crate::presentation::extractor::AppJson;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::auth::AuthorDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 20000))]
    pub(crate) content: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) thread_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostWithAuthorDto {
    #[serde(flatten)]
    pub(crate) post: PostDto,
    pub(crate) author: AuthorDto,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            content: post.content,
            author_id: post.author_id,
            thread_id: post.thread_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostWithAuthor> for PostWithAuthorDto {
    fn from(item: PostWithAuthor) -> Self {
        Self {
            post: item.post.into(),
            author: item.author.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/threads/{threadId}/posts",
    tag = "posts",
    params(
        ("threadId" = i64, Path, description = "Thread id")
    ),
    responses(
        (status = 200, description = "Replies, oldest first; empty for unknown threads", body = [PostWithAuthorDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> AppResult<Json<Vec<PostWithAuthorDto>>> {
    let Some(thread_id) = parse_id(&thread_id) else {
        return Ok(Json(Vec::new()));
    };

    let posts = state.forum_service.list_posts(thread_id).await?;
    Ok(Json(posts.into_iter().map(PostWithAuthorDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/threads/{threadId}/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("threadId" = i64, Path, description = "Thread id")
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Reply created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Thread is locked"),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(thread_id): Path<String>,
    AppJson(dto): AppJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let thread_id = parse_id(&thread_id)
        .ok_or_else(|| DomainError::validation("threadId", "must be a positive integer"))?;
    dto.validate()?;
    debug!(username = %auth.username, thread_id, "creating reply");

    let req = CreatePostRequest {
        content: dto.content,
    };

    let post = state
        .forum_service
        .create_post(auth.user_id, thread_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}
