//! In-memory Article List
//!
//! Holds the client's transient copy of the article list and the rules for
//! keeping it in step with the server:
//!
//! ```text
//! list fetch  → replace    (wholesale)
//! create      → insert     (append)
//! update      → update     (replace every entry with the same slug)
//! delete      → remove     (drop every entry with the slug)
//! ```
//!
//! Order is whatever the server returned plus local appends. There is no
//! conflict resolution and nothing is rolled back; callers only patch the
//! list after the corresponding request succeeded.

use crate::models::Article;

/// The client's copy of the article list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleList {
    articles: Vec<Article>,
}

impl ArticleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh fetch
    pub fn replace(&mut self, articles: Vec<Article>) {
        self.articles = articles;
    }

    /// Append a newly created article
    pub fn insert(&mut self, article: Article) {
        self.articles.push(article);
    }

    /// Swap in an updated article by slug. Unknown slugs are ignored.
    ///
    /// Returns the number of entries replaced.
    pub fn update(&mut self, article: &Article) -> usize {
        let mut replaced = 0;
        for existing in self.articles.iter_mut().filter(|a| a.slug == article.slug) {
            *existing = article.clone();
            replaced += 1;
        }
        replaced
    }

    /// Drop every article with this slug
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, slug: &str) -> usize {
        let before = self.articles.len();
        self.articles.retain(|a| a.slug != slug);
        before - self.articles.len()
    }

    /// Look up an article by slug
    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    /// Slugs in list order
    pub fn slugs(&self) -> Vec<&str> {
        self.articles.iter().map(|a| a.slug.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[Article] {
        &self.articles
    }

    pub fn into_vec(self) -> Vec<Article> {
        self.articles
    }
}

impl From<Vec<Article>> for ArticleList {
    fn from(articles: Vec<Article>) -> Self {
        Self { articles }
    }
}

/// Whether the viewer may edit or delete an article
///
/// Only the author gets the Update and Delete actions. An unknown viewer
/// never matches.
pub fn can_edit(viewer: Option<&str>, article: &Article) -> bool {
    viewer.map(|name| article.is_authored_by(name)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArticleList {
        ArticleList::from(vec![
            Article::new("one", "One").author("alice"),
            Article::new("two", "Two").author("bob"),
            Article::new("three", "Three").author("alice"),
        ])
    }

    #[test]
    fn test_replace_discards_previous_contents() {
        let mut list = sample();
        list.replace(vec![Article::new("four", "Four")]);

        assert_eq!(list.slugs(), vec!["four"]);
    }

    #[test]
    fn test_insert_appends() {
        let mut list = sample();
        list.insert(Article::new("four", "Four"));

        assert_eq!(list.len(), 4);
        assert!(list.contains("four"));
        assert_eq!(list.slugs().last(), Some(&"four"));
    }

    #[test]
    fn test_insert_does_not_deduplicate() {
        let mut list = sample();
        list.insert(Article::new("one", "Again"));

        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut list = sample();
        let edited = Article::new("two", "Two, revised").author("bob");

        assert_eq!(list.update(&edited), 1);
        assert_eq!(list.slugs(), vec!["one", "two", "three"]);
        assert_eq!(list.get("two").unwrap().title, "Two, revised");
    }

    #[test]
    fn test_update_unknown_slug_is_noop() {
        let mut list = sample();
        let before = list.clone();

        assert_eq!(list.update(&Article::new("missing", "Nope")), 0);
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_by_slug() {
        let mut list = sample();

        assert_eq!(list.remove("two"), 1);
        assert!(!list.contains("two"));
        assert_eq!(list.slugs(), vec!["one", "three"]);
    }

    #[test]
    fn test_remove_drops_duplicates() {
        let mut list = sample();
        list.insert(Article::new("one", "Dup"));

        assert_eq!(list.remove("one"), 2);
        assert!(!list.contains("one"));
    }

    #[test]
    fn test_remove_unknown_slug() {
        let mut list = sample();
        assert_eq!(list.remove("missing"), 0);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_can_edit_only_author() {
        let article = Article::new("one", "One").author("alice");

        assert!(can_edit(Some("alice"), &article));
        assert!(!can_edit(Some("bob"), &article));
        assert!(!can_edit(None, &article));
    }
}
