use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The caller's own account.
pub struct User {
    /// User id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Registration time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Public author projection embedded in threads and replies.
pub struct Author {
    /// User id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Registration time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Response to a successful `register` or `login`.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// Account data.
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Forum section.
pub struct Category {
    /// Category id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL slug, unique.
    pub slug: String,
    /// Optional description.
    pub description: Option<String>,
    /// Icon class name.
    pub icon: String,
    /// Hex display color.
    pub color: String,
    /// Number of threads created in this category.
    pub thread_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Discussion thread.
pub struct Thread {
    /// Thread id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Opening post body.
    pub content: String,
    /// Author id.
    pub author_id: i64,
    /// Category id.
    pub category_id: i64,
    /// Pinned threads are listed first.
    pub is_pinned: bool,
    /// Locked threads reject replies.
    pub is_locked: bool,
    /// Number of detail views.
    pub view_count: i64,
    /// Number of replies.
    pub reply_count: i64,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last activity time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Thread with its author and category.
pub struct ThreadDetails {
    /// Thread fields.
    #[serde(flatten)]
    pub thread: Thread,
    /// Thread starter.
    pub author: Author,
    /// Containing category.
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Reply inside a thread.
pub struct Post {
    /// Post id.
    pub id: i64,
    /// Body.
    pub content: String,
    /// Author id.
    pub author_id: i64,
    /// Thread id.
    pub thread_id: i64,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Reply with its author.
pub struct PostWithAuthor {
    /// Post fields.
    #[serde(flatten)]
    pub post: Post,
    /// Reply author.
    pub author: Author,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Thread listing order. Pinned threads always come first.
pub enum ThreadSort {
    /// Most recent activity first.
    #[default]
    Latest,
    /// Oldest thread first.
    Oldest,
    /// Most replies first.
    MostReplies,
    /// Most views first.
    MostViews,
}

impl ThreadSort {
    /// Query-string value understood by the server.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::MostReplies => "most-replies",
            Self::MostViews => "most-views",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `list_threads`. Unset fields are left out of the query.
pub struct ThreadQuery {
    /// Only threads of this category.
    pub category_id: Option<i64>,
    /// Listing order; the server defaults to `Latest`.
    pub sort: Option<ThreadSort>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

impl ThreadQuery {
    /// Empty query: every thread, default order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one category.
    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the listing order.
    pub fn sort(mut self, sort: ThreadSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the title search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sortBy", sort.as_str().to_string()));
        }
        if let Some(term) = self.search.as_deref().map(str::trim)
            && !term.is_empty()
        {
            pairs.push(("search", term.to_string()));
        }
        pairs
    }
}
