//! Blog Data Model
//!
//! Wire types exchanged with the blog REST API:
//!
//! - **article**: `Article` records and the `ArticleDraft` request body
//! - **user**: account, credentials, and session types
//!
//! All of these are owned by the remote service. The client imposes no
//! validation beyond what serde needs to read them.

mod article;
mod user;

pub use article::{Article, ArticleDraft};
pub use user::{Credentials, Registration, Session, TokenResponse, User};
