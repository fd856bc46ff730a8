use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[async_trait]
pub(crate) trait CategoryRepository: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
}
