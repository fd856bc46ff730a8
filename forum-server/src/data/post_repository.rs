use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) content: String,
    pub(crate) thread_id: i64,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Inserts the reply and bumps the thread's `reply_count` and
    /// `updated_at` as one unit of work. Fails with `NotFound` for a missing
    /// thread and `ThreadLocked` for a locked one.
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    /// Replies in chronological order.
    async fn list_posts(&self, thread_id: i64) -> Result<Vec<PostWithAuthor>, DomainError>;
}
