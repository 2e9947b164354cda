//! Global Application State
//!
//! Reactive state management using Leptos signals. The article list lives
//! here and is patched after each successful create, update, or delete.

use leptos::*;

use super::session;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Articles in server order, plus local appends
    pub articles: RwSignal<Vec<Article>>,
    /// Article picked from the detail view for editing
    pub edit_article: RwSignal<Option<Article>>,
    /// Session token, mirrored in local storage
    pub token: RwSignal<Option<String>>,
    /// Username of the logged-in account, once looked up
    pub username: RwSignal<Option<String>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Blog post from the API. Missing or `null` fields read as empty strings.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl Article {
    /// Publish date for display, or the raw value if it doesn't parse
    pub fn published_display(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.published)
            .map(|dt| dt.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|_| self.published.clone())
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        articles: create_rw_signal(Vec::new()),
        edit_article: create_rw_signal(None),
        token: create_rw_signal(session::load_token()),
        username: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

// ============ List synchronization ============

/// Append a newly created article
pub fn insert_article(articles: &mut Vec<Article>, article: Article) {
    articles.push(article);
}

/// Replace every entry sharing the article's slug
pub fn replace_article(articles: &mut [Article], article: &Article) {
    for existing in articles.iter_mut().filter(|a| a.slug == article.slug) {
        *existing = article.clone();
    }
}

/// Drop every entry with this slug
pub fn remove_article(articles: &mut Vec<Article>, slug: &str) {
    articles.retain(|a| a.slug != slug);
}

/// Only the author sees Update and Delete
pub fn can_edit(viewer: Option<&str>, article: &Article) -> bool {
    matches!(viewer, Some(name) if !name.is_empty() && name == article.author)
}

impl GlobalState {
    /// Replace the list with a fresh fetch
    pub fn set_articles(&self, articles: Vec<Article>) {
        self.articles.set(articles);
    }

    pub fn inserted_article(&self, article: Article) {
        self.articles.update(|list| insert_article(list, article));
    }

    pub fn updated_article(&self, article: Article) {
        self.articles.update(|list| replace_article(list, &article));
    }

    pub fn deleted_article(&self, slug: &str) {
        self.articles.update(|list| remove_article(list, slug));
    }

    /// Remember which article the update page should edit
    pub fn select_for_edit(&self, article: Article) {
        self.edit_article.set(Some(article));
    }

    /// Store a fresh token; route gating reacts to the change
    pub fn log_in(&self, token: String) {
        session::save_token(&token);
        self.token.set(Some(token));
    }

    /// Forget the token and everything fetched with it
    pub fn log_out(&self) {
        session::clear_token();
        self.token.set(None);
        self.username.set(None);
        self.edit_article.set(None);
        self.articles.set(Vec::new());
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.with(|t| t.is_some())
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_list_tolerates_nulls() {
        let json = r#"[
            {"title": "One", "description": null, "slug": "one", "author": 7},
            {"title": "Two", "slug": "two", "author": "bob", "published": null}
        ]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].description, "");
        assert_eq!(articles[0].author, "7");
        assert_eq!(articles[1].published, "");
    }

    fn article(slug: &str, author: &str) -> Article {
        Article {
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            author: author.to_string(),
            ..Default::default()
        }
    }

    fn slugs(list: &[Article]) -> Vec<&str> {
        list.iter().map(|a| a.slug.as_str()).collect()
    }

    #[test]
    fn test_insert_appends() {
        let mut list = vec![article("a", "ann")];
        insert_article(&mut list, article("b", "bob"));

        assert_eq!(list.len(), 2);
        assert_eq!(slugs(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_by_slug() {
        let mut list = vec![article("a", "ann"), article("b", "bob")];
        let mut edited = article("a", "ann");
        edited.title = "Edited".to_string();

        replace_article(&mut list, &edited);

        assert_eq!(list[0].title, "Edited");
        assert_eq!(list[1].title, "B");
    }

    #[test]
    fn test_remove_by_slug() {
        let mut list = vec![article("a", "ann"), article("b", "bob"), article("c", "ann")];
        remove_article(&mut list, "b");

        assert_eq!(slugs(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_can_edit() {
        let a = article("a", "ann");

        assert!(can_edit(Some("ann"), &a));
        assert!(!can_edit(Some("bob"), &a));
        assert!(!can_edit(None, &a));
        assert!(!can_edit(Some(""), &article("x", "")));
    }

    #[test]
    fn test_published_display() {
        let mut a = article("a", "ann");
        a.published = "2022-03-01T10:15:00Z".to_string();
        assert_eq!(a.published_display(), "March 1, 2022");

        a.published = "soon".to_string();
        assert_eq!(a.published_display(), "soon");
    }
}
