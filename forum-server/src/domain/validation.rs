//! Field normalization shared by the thread and reply request types.

use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 255;
pub(crate) const CONTENT_MAX_CHARS: usize = 20_000;

pub(crate) fn validate_id(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::validation(field, "must be > 0"));
    }
    Ok(())
}

pub(crate) fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(DomainError::validation("title", "must be 1..255 chars"));
    }
    Ok(title.to_string())
}

pub(crate) fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::validation("content", "must not be empty"));
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(DomainError::validation("content", "must be at most 20000 chars"));
    }
    Ok(content.to_string())
}

/// Parses a path segment into an entity id. Anything that is not a
/// positive integer is treated as an id that matches no row.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
