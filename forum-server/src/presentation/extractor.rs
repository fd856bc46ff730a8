use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::presentation::app_error::AppError;

/// `Json` whose rejections render as `{"error": ...}` with status 400
/// (413 when the body exceeds the configured limit).
pub(crate) struct AppJson<T>(pub(crate) T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_to_app_error(rejection)),
        }
    }
}

/// `Query` whose rejections render as `{"error": ...}` with status 400.
pub(crate) struct AppQuery<T>(pub(crate) T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection_to_app_error(rejection)),
        }
    }
}

fn json_rejection_to_app_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("invalid JSON syntax: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "expected `Content-Type: application/json`".to_string()
        }
        _ => "failed to read request body".to_string(),
    };
    AppError::BadRequest(message)
}

fn query_rejection_to_app_error(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(format!("invalid query: {}", rejection.body_text()))
}
