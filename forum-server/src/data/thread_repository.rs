use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::thread::{Thread, ThreadDetails, ThreadFilter};

#[derive(Debug, Clone)]
pub(crate) struct NewThread {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait ThreadRepository: Send + Sync {
    /// Inserts the thread and bumps the owning category's `thread_count` as
    /// one unit of work.
    async fn create_thread(&self, input: NewThread) -> Result<Thread, DomainError>;
    async fn get_thread(&self, id: i64) -> Result<Option<ThreadDetails>, DomainError>;
    async fn list_threads(&self, filter: &ThreadFilter) -> Result<Vec<ThreadDetails>, DomainError>;
    /// Relative `view_count + 1`. Returns the new count, `None` when the
    /// thread does not exist.
    async fn increment_views(&self, id: i64) -> Result<Option<i64>, DomainError>;
}
