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

use crate::domain::thread::{CreateThreadRequest, Thread, ThreadDetails, ThreadFilter};
use crate::domain::validation::parse_id;
use crate::presentation::AppState;
use crate::presentation::extractor::{AppJson, AppQuery};
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::handlers::auth::AuthorDto;
use crate::presentation::handlers::categories::CategoryDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateThreadDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 20000))]
    pub(crate) content: String,
    #[validate(range(min = 1))]
    pub(crate) category_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadListQuery {
    pub(crate) category_id: Option<i64>,
    pub(crate) sort_by: Option<String>,
    pub(crate) search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: i64,
    pub(crate) is_pinned: bool,
    pub(crate) is_locked: bool,
    pub(crate) view_count: i64,
    pub(crate) reply_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Thread with its author and category embedded.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadDetailsDto {
    #[serde(flatten)]
    pub(crate) thread: ThreadDto,
    pub(crate) author: AuthorDto,
    pub(crate) category: CategoryDto,
}

impl From<Thread> for ThreadDto {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            content: thread.content,
            author_id: thread.author_id,
            category_id: thread.category_id,
            is_pinned: thread.is_pinned,
            is_locked: thread.is_locked,
            view_count: thread.view_count,
            reply_count: thread.reply_count,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        }
    }
}

impl From<ThreadDetails> for ThreadDetailsDto {
    fn from(details: ThreadDetails) -> Self {
        Self {
            thread: details.thread.into(),
            author: details.author.into(),
            category: details.category.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/threads",
    tag = "threads",
    params(
        ("categoryId" = Option<i64>, Query, description = "Only threads of this category"),
        ("sortBy" = Option<String>, Query, description = "latest (default), oldest, most-replies or most-views"),
        ("search" = Option<String>, Query, description = "Case-insensitive title substring")
    ),
    responses(
        (status = 200, description = "Threads listed, pinned first", body = [ThreadDetailsDto]),
        (status = 400, description = "Malformed query"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_threads(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ThreadListQuery>,
) -> AppResult<Json<Vec<ThreadDetailsDto>>> {
    let filter = ThreadFilter::new(
        query.category_id,
        query.sort_by.as_deref(),
        query.search.as_deref(),
    );

    let threads = state.forum_service.list_threads(filter).await?;
    Ok(Json(
        threads.into_iter().map(ThreadDetailsDto::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/threads/{id}",
    tag = "threads",
    params(
        ("id" = i64, Path, description = "Thread id")
    ),
    responses(
        (status = 200, description = "Thread found; counts as one view", body = ThreadDetailsDto),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_thread(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ThreadDetailsDto>> {
    let id = parse_id(&id).ok_or(AppError::NotFound)?;

    let details = state.forum_service.view_thread(id).await?;
    Ok(Json(details.into()))
}

#[utoipa::path(
    post,
    path = "/api/threads",
    tag = "threads",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateThreadDto,
    responses(
        (status = 201, description = "Thread created", body = ThreadDto),
        (status = 400, description = "Validation error or unknown category"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_thread(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<CreateThreadDto>,
) -> AppResult<(StatusCode, Json<ThreadDto>)> {
    dto.validate()?;
    debug!(username = %auth.username, "creating thread");

    let req = CreateThreadRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category_id,
    };

    let thread = state.forum_service.create_thread(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(ThreadDto::from(thread))))
}
