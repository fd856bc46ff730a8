use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::forum_service::ForumService;
use crate::data::repositories::postgres::category_repository::PostgresCategoryRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::thread_repository::PostgresThreadRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;

pub(crate) mod app_error;
pub(crate) mod extractor;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type PgForumService =
    ForumService<PostgresCategoryRepository, PostgresThreadRepository, PostgresPostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) forum_service: Arc<PgForumService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        forum_service: Arc<PgForumService>,
    ) -> Self {
        Self {
            auth_service,
            forum_service,
        }
    }
}
