//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod article_card;
pub mod article_form;
pub mod chat_widget;
pub mod loading;
pub mod nav;
pub mod toast;

pub use article_card::ArticleCard;
pub use article_form::ArticleForm;
pub use chat_widget::ChatWidget;
pub use loading::Loading;
pub use nav::Nav;
pub use toast::Toast;
