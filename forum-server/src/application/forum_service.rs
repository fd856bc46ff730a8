use tracing::{debug, info};

use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::thread_repository::{NewThread, ThreadRepository};
use crate::domain::category::Category;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostWithAuthor};
use crate::domain::thread::{CreateThreadRequest, Thread, ThreadDetails, ThreadFilter};

/// Read/write facade over categories, threads and replies.
pub(crate) struct ForumService<C, T, P>
where
    C: CategoryRepository,
    T: ThreadRepository,
    P: PostRepository,
{
    categories: C,
    threads: T,
    posts: P,
}

impl<C, T, P> ForumService<C, T, P>
where
    C: CategoryRepository,
    T: ThreadRepository,
    P: PostRepository,
{
    pub(crate) fn new(categories: C, threads: T, posts: P) -> Self {
        Self {
            categories,
            threads,
            posts,
        }
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.list_categories().await
    }

    pub(crate) async fn get_category(&self, slug: &str) -> Result<Category, DomainError> {
        self.categories
            .find_by_slug(slug.trim())
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("category slug: {slug}")))
    }

    pub(crate) async fn list_threads(
        &self,
        filter: ThreadFilter,
    ) -> Result<Vec<ThreadDetails>, DomainError> {
        debug!(
            category_id = ?filter.category_id,
            sort = filter.sort.as_str(),
            search = filter.search.as_deref(),
            "listing threads"
        );
        self.threads.list_threads(&filter).await
    }

    /// Detail view: counts as one view. A missing thread is reported before
    /// anything is written.
    pub(crate) async fn view_thread(&self, id: i64) -> Result<ThreadDetails, DomainError> {
        let mut details = self
            .threads
            .get_thread(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("thread id: {id}")))?;

        let view_count = self
            .threads
            .increment_views(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("thread id: {id}")))?;
        details.thread.view_count = view_count;

        Ok(details)
    }

    pub(crate) async fn create_thread(
        &self,
        author_id: i64,
        req: CreateThreadRequest,
    ) -> Result<Thread, DomainError> {
        let req = req.validate()?;

        let thread = self
            .threads
            .create_thread(NewThread {
                title: req.title,
                content: req.content,
                category_id: req.category_id,
                author_id,
            })
            .await?;

        info!(
            thread_id = thread.id,
            category_id = thread.category_id,
            author_id,
            "thread created"
        );
        Ok(thread)
    }

    pub(crate) async fn list_posts(&self, thread_id: i64) -> Result<Vec<PostWithAuthor>, DomainError> {
        self.posts.list_posts(thread_id).await
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        thread_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let post = self
            .posts
            .create_post(NewPost {
                content: req.content,
                thread_id,
                author_id,
            })
            .await?;

        info!(post_id = post.id, thread_id, author_id, "reply created");
        Ok(post)
    }
}
