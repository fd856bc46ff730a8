use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::forum_service::ForumService;
use data::repositories::postgres::category_repository::PostgresCategoryRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::thread_repository::PostgresThreadRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;
    info!(addr = %settings.http_addr, "starting forum-server");

    let pool = create_pool(&settings).await?;
    run_migrations(&pool).await?;

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);
    let auth_service = AuthService::new(PostgresUserRepository::new(pool.clone()), jwt);
    let forum_service = ForumService::new(
        PostgresCategoryRepository::new(pool.clone()),
        PostgresThreadRepository::new(pool.clone()),
        PostgresPostRepository::new(pool),
    );

    let state = AppState::new(Arc::new(auth_service), Arc::new(forum_service));
    server::run_http(&settings, state).await
}
