use reqwest::{Client, IntoUrl, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{ForumClientError, ForumClientResult};
use crate::models::{
    AuthResponse, Category, Post, PostWithAuthor, Thread, ThreadDetails, ThreadQuery, User,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateThreadRequestDto<'a> {
    title: &'a str,
    content: &'a str,
    category_id: i64,
}

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

/// Thin REST transport over `reqwest`; knows routes, not sessions.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> ForumClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Builds a URL from raw path segments; each segment is percent-encoded.
    fn segments_endpoint(&self, segments: &[&str]) -> ForumClientResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ForumClientError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ForumClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode_error(response: reqwest::Response) -> ForumClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        ForumClientError::from_http_status(status, message)
    }

    async fn execute<TRes>(request: RequestBuilder) -> ForumClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(ForumClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(ForumClientError::from_reqwest)
    }

    async fn get_json<TRes>(&self, path: &str, token: Option<&str>) -> ForumClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        self.get_json_at(self.endpoint(path), token).await
    }

    async fn get_json_at<TRes>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
    ) -> ForumClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let mut request = self.client.request(Method::GET, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::execute(request).await
    }

    async fn post_json<TReq, TRes>(
        &self,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> ForumClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let mut request = self
            .client
            .request(Method::POST, self.endpoint(path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::execute(request).await
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ForumClientResult<AuthResponse> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
        };
        self.post_json("/api/auth/register", &payload, None).await
    }

    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> ForumClientResult<AuthResponse> {
        let payload = LoginRequestDto { username, password };
        self.post_json("/api/auth/login", &payload, None).await
    }

    pub(crate) async fn me(&self, token: &str) -> ForumClientResult<User> {
        self.get_json("/api/auth/me", Some(token)).await
    }

    pub(crate) async fn list_categories(&self) -> ForumClientResult<Vec<Category>> {
        self.get_json("/api/categories", None).await
    }

    pub(crate) async fn get_category(&self, slug: &str) -> ForumClientResult<Category> {
        let url = self.segments_endpoint(&["api", "categories", slug])?;
        self.get_json_at(url, None).await
    }

    pub(crate) async fn list_threads(
        &self,
        query: &ThreadQuery,
    ) -> ForumClientResult<Vec<ThreadDetails>> {
        let request = self
            .client
            .request(Method::GET, self.endpoint("/api/threads"))
            .query(&query.to_pairs());
        Self::execute(request).await
    }

    pub(crate) async fn get_thread(&self, id: i64) -> ForumClientResult<ThreadDetails> {
        self.get_json(&format!("/api/threads/{id}"), None).await
    }

    pub(crate) async fn create_thread(
        &self,
        token: &str,
        title: &str,
        content: &str,
        category_id: i64,
    ) -> ForumClientResult<Thread> {
        let payload = CreateThreadRequestDto {
            title,
            content,
            category_id,
        };
        self.post_json("/api/threads", &payload, Some(token)).await
    }

    pub(crate) async fn list_posts(&self, thread_id: i64) -> ForumClientResult<Vec<PostWithAuthor>> {
        self.get_json(&format!("/api/threads/{thread_id}/posts"), None)
            .await
    }

    pub(crate) async fn create_post(
        &self,
        token: &str,
        thread_id: i64,
        content: &str,
    ) -> ForumClientResult<Post> {
        let payload = CreatePostRequestDto { content };
        self.post_json(
            &format!("/api/threads/{thread_id}/posts"),
            &payload,
            Some(token),
        )
        .await
    }
}
