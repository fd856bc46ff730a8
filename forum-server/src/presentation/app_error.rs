use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

impl ErrorBody {
    pub(crate) fn response(status: StatusCode, msg: impl Into<String>) -> Response {
        (status, Json(Self { error: msg.into() })).into_response()
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                DomainError::ThreadLocked(_) => (StatusCode::FORBIDDEN, err.to_string()),
                DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(error = %detail, "unexpected domain error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "request body too large".to_string(),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();
        ErrorBody::response(status, msg)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::AppError;
    use crate::domain::error::DomainError;

    fn status_of(err: AppError) -> (StatusCode, String) {
        err.status_and_message()
    }

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let cases = [
            (DomainError::validation("title", "must not be empty"), StatusCode::BAD_REQUEST),
            (DomainError::NotFound("thread id: 7".into()), StatusCode::NOT_FOUND),
            (DomainError::AlreadyExists("username".into()), StatusCode::CONFLICT),
            (DomainError::ThreadLocked(7), StatusCode::FORBIDDEN),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        ];
        for (err, expected) in cases {
            assert_eq!(status_of(AppError::from(err)).0, expected);
        }
    }

    #[test]
    fn request_level_errors_map_to_http_statuses() {
        assert_eq!(status_of(AppError::NotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::Unauthorized).0, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::BadRequest("invalid query".into())),
            (StatusCode::BAD_REQUEST, "invalid query".to_string())
        );
        assert_eq!(
            status_of(AppError::PayloadTooLarge).0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn unexpected_errors_hide_details() {
        let (status, msg) = status_of(AppError::from(DomainError::Unexpected(
            "connection reset by peer".into(),
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "internal error");
    }
}
