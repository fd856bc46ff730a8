use std::time::Duration;

use axum::{
    BoxError, Router, error_handling::HandleErrorLayer, extract::DefaultBodyLimit,
    http::StatusCode, response::Response,
};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tracing::warn;

use crate::infrastructure::settings::Settings;
use crate::presentation::app_error::ErrorBody;

/// Request timeout, a process-wide in-flight cap and a body size cap.
///
/// The body cap is enforced by the JSON extractor, so an oversized body
/// is answered with 413 and the usual error body.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_limit_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.http_request_timeout_secs,
                )))
                .layer(GlobalConcurrencyLimitLayer::new(
                    settings.http_concurrency_limit,
                )),
        )
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
}

async fn handle_limit_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return ErrorBody::response(StatusCode::REQUEST_TIMEOUT, "request timed out");
    }
    warn!(error = %err, "request rejected by middleware");
    ErrorBody::response(StatusCode::SERVICE_UNAVAILABLE, "service unavailable")
}
