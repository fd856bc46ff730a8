use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::categories::{get_category, list_categories};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{slug}", get(get_category))
}
