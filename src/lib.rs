//! # Quill
//!
//! A Rust client for a REST blog platform: browse articles, publish and edit
//! your own, and manage an account session.
//!
//! ## Modules
//!
//! - [`models`]: Article and account wire types
//! - [`store`]: In-memory article list and its sync rules
//! - [`session`]: Token slot and login gating
//! - [`client`]: HTTP client for the blog API
//! - [`config`]: TOML configuration with environment overrides
//! - [`commands`]: CLI subcommands
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quill::{ArticleDraft, ArticleList, BlogClient, BlogService, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BlogClient::new(ClientConfig::default())?.with_token("my-token");
//!
//!     let mut articles = ArticleList::new();
//!     articles.replace(client.list_articles().await?);
//!
//!     let created = client
//!         .create_article(&ArticleDraft::new("Hello", "First post"))
//!         .await?;
//!     articles.insert(created);
//!
//!     println!("{} articles", articles.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod models;
pub mod session;
pub mod store;

pub use client::{BlogClient, BlogService, ClientConfig, ClientError, ClientResult};
pub use config::{Config, ConfigError, LoggingConfig};
pub use models::{Article, ArticleDraft, Credentials, Registration, Session, TokenResponse, User};
pub use session::{landing_route, FileTokenStore, MemoryTokenStore, SessionError, TokenStore};
pub use store::{can_edit, ArticleList};
