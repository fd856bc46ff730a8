//! Client library for the `forum-server` REST API.
//!
//! `ForumClient` keeps the JWT returned by `register`/`login` and sends it
//! on protected calls (`me`, `create_thread`, `create_post`). Protected calls
//! made without a token fail locally with `ForumClientError::Unauthorized`.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{ForumClientError, ForumClientResult};
pub use models::{
    AuthResponse, Author, Category, Post, PostWithAuthor, Thread, ThreadDetails, ThreadQuery,
    ThreadSort, User,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Session-aware client for a forum server.
pub struct ForumClient {
    http: HttpClient,
    token: Option<String>,
}

impl ForumClient {
    /// Creates a client for a base URL such as `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> ForumClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Sets the JWT manually.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Returns the stored JWT, if any.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Forgets the stored JWT.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Registers an account and stores the returned token.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ForumClientResult<AuthResponse> {
        let result = self.http.register(username, email, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Logs in and stores the returned token.
    pub async fn login(&mut self, username: &str, password: &str) -> ForumClientResult<AuthResponse> {
        let result = self.http.login(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Returns the account behind the stored token.
    pub async fn me(&self) -> ForumClientResult<User> {
        let token = self.require_token()?;
        self.http.me(token).await
    }

    /// Lists all categories ordered by name.
    pub async fn list_categories(&self) -> ForumClientResult<Vec<Category>> {
        self.http.list_categories().await
    }

    /// Looks a category up by slug.
    pub async fn get_category(&self, slug: &str) -> ForumClientResult<Category> {
        self.http.get_category(slug).await
    }

    /// Lists threads matching `query`, pinned threads first.
    pub async fn list_threads(&self, query: &ThreadQuery) -> ForumClientResult<Vec<ThreadDetails>> {
        self.http.list_threads(query).await
    }

    /// Fetches one thread. Each call counts as a view on the server.
    pub async fn get_thread(&self, id: i64) -> ForumClientResult<ThreadDetails> {
        self.http.get_thread(id).await
    }

    /// Starts a thread in a category.
    pub async fn create_thread(
        &self,
        title: &str,
        content: &str,
        category_id: i64,
    ) -> ForumClientResult<Thread> {
        let token = self.require_token()?;
        self.http
            .create_thread(token, title, content, category_id)
            .await
    }

    /// Lists a thread's replies, oldest first.
    pub async fn list_posts(&self, thread_id: i64) -> ForumClientResult<Vec<PostWithAuthor>> {
        self.http.list_posts(thread_id).await
    }

    /// Replies to a thread. Locked threads yield `ForumClientError::Forbidden`.
    pub async fn create_post(&self, thread_id: i64, content: &str) -> ForumClientResult<Post> {
        let token = self.require_token()?;
        self.http.create_post(token, thread_id, content).await
    }

    fn require_token(&self) -> ForumClientResult<&str> {
        self.token.as_deref().ok_or(ForumClientError::Unauthorized)
    }
}
