use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{create_post, list_posts};
use crate::presentation::handlers::threads::{create_thread, get_thread, list_threads};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_threads))
        .route("/{id}", get(get_thread))
        .route("/{thread_id}/posts", get(list_posts));

    let protected = Router::new()
        .route("/", post(create_thread))
        .route("/{thread_id}/posts", post(create_post))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    public.merge(protected)
}
