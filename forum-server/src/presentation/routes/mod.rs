use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod threads;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/categories", categories::router())
        .nest("/api/threads", threads::router(state))
}
