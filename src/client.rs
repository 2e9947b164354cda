//! Blog REST API Client
//!
//! HTTP client for the blog service. Article routes and the account routes
//! all hang off one base URL:
//!
//! ```text
//! GET    /articles/                    list
//! POST   /articles/                    create
//! GET    /articles/{slug}/             detail
//! PUT    /articles/{slug}/             update
//! DELETE /articles/{slug}/             delete
//! POST   /dj-rest-auth/registration/   register
//! POST   /dj-rest-auth/login/          login
//! POST   /dj-rest-auth/logout/         logout
//! GET    /dj-rest-auth/user/           current user
//! ```
//!
//! Authenticated calls carry `Authorization: Token <token>`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Article, ArticleDraft, Credentials, Registration, Session, TokenResponse, User,
};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://blogrestapi1.herokuapp.com";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Operations the blog service offers
///
/// The CLI is written against this trait rather than the HTTP client so the
/// command layer can be exercised without a server.
#[async_trait]
pub trait BlogService: Send + Sync {
    async fn list_articles(&self) -> ClientResult<Vec<Article>>;
    async fn get_article(&self, slug: &str) -> ClientResult<Article>;
    async fn create_article(&self, draft: &ArticleDraft) -> ClientResult<Article>;
    async fn update_article(&self, slug: &str, draft: &ArticleDraft) -> ClientResult<Article>;
    async fn delete_article(&self, slug: &str) -> ClientResult<()>;
    async fn register(&self, registration: &Registration) -> ClientResult<String>;
    async fn login(&self, credentials: &Credentials) -> ClientResult<String>;
    async fn logout(&self) -> ClientResult<()>;
    async fn current_user(&self) -> ClientResult<User>;
}

/// HTTP implementation of [`BlogService`]
pub struct BlogClient {
    client: Client,
    config: ClientConfig,
    session: Option<Session>,
}

impl BlogClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config: ClientConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            session: None,
        })
    }

    /// Builder method: authenticate subsequent calls with `token`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.session = Some(Session::new(token));
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.session = token.map(Session::new);
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn article_url(&self, slug: &str) -> String {
        self.url(&format!("/articles/{}/", urlencoding::encode(slug)))
    }

    /// Attach the token header, or fail before sending anything
    fn authorized(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let session = self.session.as_ref().ok_or(ClientError::MissingToken)?;
        Ok(request.header(reqwest::header::AUTHORIZATION, session.authorization()))
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(ClientError::from_reqwest)?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.send(request).await?;
        response.json().await.map_err(ClientError::from_reqwest)
    }
}

#[async_trait]
impl BlogService for BlogClient {
    async fn list_articles(&self) -> ClientResult<Vec<Article>> {
        let request = self.authorized(self.client.get(self.url("/articles/")))?;
        let articles: Vec<Article> = self.send_json(request).await?;
        tracing::debug!(count = articles.len(), "Fetched article list");
        Ok(articles)
    }

    async fn get_article(&self, slug: &str) -> ClientResult<Article> {
        let request = self.authorized(self.client.get(self.article_url(slug)))?;
        self.send_json(request).await
    }

    async fn create_article(&self, draft: &ArticleDraft) -> ClientResult<Article> {
        let request = self.authorized(self.client.post(self.url("/articles/")).json(draft))?;
        let article: Article = self.send_json(request).await?;
        tracing::info!(slug = %article.slug, "Created article");
        Ok(article)
    }

    async fn update_article(&self, slug: &str, draft: &ArticleDraft) -> ClientResult<Article> {
        let request = self.authorized(self.client.put(self.article_url(slug)).json(draft))?;
        let article: Article = self.send_json(request).await?;
        tracing::info!(slug = %article.slug, "Updated article");
        Ok(article)
    }

    async fn delete_article(&self, slug: &str) -> ClientResult<()> {
        let request = self.authorized(self.client.delete(self.article_url(slug)))?;
        self.send(request).await?;
        tracing::info!(slug = %slug, "Deleted article");
        Ok(())
    }

    async fn register(&self, registration: &Registration) -> ClientResult<String> {
        let request = self
            .client
            .post(self.url("/dj-rest-auth/registration/"))
            .json(registration);
        let reply: TokenResponse = self.send_json(request).await?;
        tracing::info!(username = %registration.username, "Registered account");
        Ok(reply.key)
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        let request = self
            .client
            .post(self.url("/dj-rest-auth/login/"))
            .json(credentials);
        let reply: TokenResponse = self.send_json(request).await?;
        tracing::info!(username = %credentials.username, "Logged in");
        Ok(reply.key)
    }

    async fn logout(&self) -> ClientResult<()> {
        let request = self.authorized(self.client.post(self.url("/dj-rest-auth/logout/")))?;
        self.send(request).await?;
        Ok(())
    }

    async fn current_user(&self) -> ClientResult<User> {
        let request = self.authorized(self.client.get(self.url("/dj-rest-auth/user/")))?;
        self.send_json(request).await
    }
}

/// Turn non-2xx responses into errors
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), body = %message, "API request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Result type for API calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when talking to the blog API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Blog API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("Not logged in")]
    MissingToken,

    #[error("Invalid or expired token")]
    Unauthorized,

    #[error("Only the author may do that")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }
}
