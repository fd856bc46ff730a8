use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::error::DomainError;
use super::user::Author;
use super::validation::{normalize_content, normalize_title, validate_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Thread {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: i64,
    pub(crate) is_pinned: bool,
    pub(crate) is_locked: bool,
    pub(crate) view_count: i64,
    pub(crate) reply_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Thread joined with its author and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ThreadDetails {
    pub(crate) thread: Thread,
    pub(crate) author: Author,
    pub(crate) category: Category,
}

/// Listing order. Pinned threads always come first; the variant decides the
/// order inside the pinned and unpinned groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ThreadSort {
    #[default]
    Latest,
    Oldest,
    MostReplies,
    MostViews,
}

impl ThreadSort {
    /// Unknown or missing keys fall back to `Latest`.
    pub(crate) fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => Self::Oldest,
            Some("most-replies") => Self::MostReplies,
            Some("most-views") => Self::MostViews,
            _ => Self::Latest,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::MostReplies => "most-replies",
            Self::MostViews => "most-views",
        }
    }
}

/// Conjunctive listing filter; `None` fields impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ThreadFilter {
    pub(crate) category_id: Option<i64>,
    pub(crate) search: Option<String>,
    pub(crate) sort: ThreadSort,
}

impl ThreadFilter {
    pub(crate) fn new(category_id: Option<i64>, sort_by: Option<&str>, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        Self {
            category_id,
            search,
            sort: ThreadSort::from_param(sort_by),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateThreadRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
}

impl CreateThreadRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_id("categoryId", self.category_id)?;
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            category_id: self.category_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateThreadRequest, ThreadFilter, ThreadSort};
    use crate::domain::error::DomainError;

    #[test]
    fn sort_key_parses_known_values() {
        assert_eq!(ThreadSort::from_param(Some("oldest")), ThreadSort::Oldest);
        assert_eq!(
            ThreadSort::from_param(Some("most-replies")),
            ThreadSort::MostReplies
        );
        assert_eq!(
            ThreadSort::from_param(Some("most-views")),
            ThreadSort::MostViews
        );
        assert_eq!(ThreadSort::from_param(Some("latest")), ThreadSort::Latest);
    }

    #[test]
    fn sort_key_defaults_to_latest() {
        assert_eq!(ThreadSort::from_param(None), ThreadSort::Latest);
        assert_eq!(ThreadSort::from_param(Some("")), ThreadSort::Latest);
        assert_eq!(ThreadSort::from_param(Some("MOST-VIEWS")), ThreadSort::Latest);
        assert_eq!(ThreadSort::from_param(Some("random")), ThreadSort::Latest);
    }

    #[test]
    fn sort_key_round_trips_through_as_str() {
        for sort in [
            ThreadSort::Latest,
            ThreadSort::Oldest,
            ThreadSort::MostReplies,
            ThreadSort::MostViews,
        ] {
            assert_eq!(ThreadSort::from_param(Some(sort.as_str())), sort);
        }
    }

    #[test]
    fn filter_drops_blank_search() {
        let filter = ThreadFilter::new(None, None, Some("   "));
        assert_eq!(filter.search, None);
        assert_eq!(filter.sort, ThreadSort::Latest);

        let filter = ThreadFilter::new(Some(3), Some("oldest"), Some("  rust  "));
        assert_eq!(filter.category_id, Some(3));
        assert_eq!(filter.search.as_deref(), Some("rust"));
        assert_eq!(filter.sort, ThreadSort::Oldest);
    }

    #[test]
    fn create_thread_request_normalizes_fields() {
        let req = CreateThreadRequest {
            title: "  Welcome  ".to_string(),
            content: "  first!  ".to_string(),
            category_id: 2,
        };
        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "Welcome");
        assert_eq!(validated.content, "first!");
        assert_eq!(validated.category_id, 2);
    }

    #[test]
    fn create_thread_request_rejects_bad_category() {
        let req = CreateThreadRequest {
            title: "Welcome".to_string(),
            content: "body".to_string(),
            category_id: 0,
        };
        match req.validate() {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "categoryId"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
