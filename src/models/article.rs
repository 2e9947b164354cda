//! Article types
//!
//! An `Article` is a blog post as served by the API. Every field is optional
//! on the wire: missing keys and `null` become empty strings, and other
//! scalars are kept in their JSON text form.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A blog post record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Server-assigned identifier, unique per article
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    /// Username of the author
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    /// Publish timestamp exactly as the server sent it
    #[serde(default, deserialize_with = "lenient_string")]
    pub published: String,
}

impl Article {
    /// Create an article with the given slug and title
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: set author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Builder method: set publish timestamp
    pub fn published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    /// Parse the publish timestamp as RFC 3339
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.published).ok()
    }

    /// Human-readable publish date, falling back to the raw string
    pub fn published_display(&self) -> String {
        self.published_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| self.published.clone())
    }

    /// Whether `username` wrote this article
    pub fn is_authored_by(&self, username: &str) -> bool {
        !username.is_empty() && self.author == username
    }

    /// The editable part of this article, for an update request
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Request body for creating or updating an article
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_missing_fields_default() {
        let article: Article = serde_json::from_str(r#"{"slug": "hello"}"#).unwrap();

        assert_eq!(article.slug, "hello");
        assert!(article.title.is_empty());
        assert!(article.author.is_empty());
    }

    #[test]
    fn test_article_list_with_null_and_numeric_fields() {
        let json = r#"[
            {"title": "One", "description": null, "slug": "one", "author": 3},
            {"title": "Two", "description": "d", "slug": "two", "author": "bob", "published": null}
        ]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].description, "");
        assert_eq!(articles[0].author, "3");
        assert_eq!(articles[1].published, "");
    }

    #[test]
    fn test_article_ignores_unknown_fields() {
        let json = r#"{
            "id": 4,
            "title": "First post",
            "description": "Body",
            "slug": "first-post",
            "author": "alice",
            "published": "2022-03-01T10:15:00Z"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.title, "First post");
        assert_eq!(article.author, "alice");
    }

    #[test]
    fn test_published_display() {
        let article = Article::new("a", "A").published("2022-03-01T10:15:00+00:00");
        assert_eq!(article.published_display(), "2022-03-01 10:15");

        let raw = Article::new("b", "B").published("yesterday");
        assert!(raw.published_at().is_none());
        assert_eq!(raw.published_display(), "yesterday");
    }

    #[test]
    fn test_is_authored_by() {
        let article = Article::new("a", "A").author("alice");

        assert!(article.is_authored_by("alice"));
        assert!(!article.is_authored_by("bob"));
        assert!(!Article::new("b", "B").is_authored_by(""));
    }

    #[test]
    fn test_draft_serializes_only_editable_fields() {
        let article = Article::new("a", "Title").description("Text").author("alice");
        let json = serde_json::to_value(article.to_draft()).unwrap();

        assert_eq!(json, serde_json::json!({"title": "Title", "description": "Text"}));
    }
}
