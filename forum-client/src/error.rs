use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `forum-client`.
pub enum ForumClientError {
    /// Transport failure or undecodable response (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot be combined with a request path.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Missing or rejected token (HTTP 401), or a protected call made
    /// before `register`/`login`.
    #[error("unauthorized")]
    Unauthorized,

    /// The server refused the action, e.g. a reply to a locked thread (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Any other non-success status, carrying the server's `error` message.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the `{"error": ...}` body, or the status line.
        message: String,
    },
}

/// Result of `forum-client` operations.
pub type ForumClientResult<T> = Result<T, ForumClientError>;

impl ForumClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
