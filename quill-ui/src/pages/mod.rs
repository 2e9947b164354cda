//! Pages
//!
//! Top-level page components for each route.

pub mod add_article;
pub mod article_detail;
pub mod articles;
pub mod login;
pub mod register;
pub mod settings;
pub mod update_article;

pub use add_article::AddArticle;
pub use article_detail::ArticleDetail;
pub use articles::Articles;
pub use login::Login;
pub use register::Register;
pub use settings::Settings;
pub use update_article::UpdateArticle;
