//! CLI Commands
//!
//! One subcommand per blog operation. Commands that create, update, or delete
//! an article first load the list, patch the local [`ArticleList`] once the
//! server accepts the change, and print the patched list. Handlers are written against [`BlogService`] and [`TokenStore`]
//! so they run the same against the HTTP client or a test double.

use anyhow::{bail, Context as _};
use clap::{Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use crate::client::{BlogService, ClientError};
use crate::models::{Article, ArticleDraft, Credentials, Registration};
use crate::session::{landing_route, TokenStore, LOGIN_ROUTE};
use crate::store::{can_edit, ArticleList};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and store the session token
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account and store the session token
    Register {
        username: String,
        #[arg(short, long, default_value = "")]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the session token
    Logout,

    /// Show the logged-in account
    Whoami,

    /// List all articles
    List,

    /// Show one article
    Show { slug: String },

    /// Publish a new article
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
    },

    /// Edit an existing article
    Update {
        slug: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an article
    Delete { slug: String },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Whether the command needs a stored token
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Register { .. } | Command::Logout | Command::Config { .. }
        )
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything a command handler needs
pub struct CommandContext<'a> {
    pub service: &'a dyn BlogService,
    pub tokens: &'a dyn TokenStore,
    pub format: OutputFormat,
    /// Local copy of the list, patched after successful mutations
    pub articles: ArticleList,
    synced: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(service: &'a dyn BlogService, tokens: &'a dyn TokenStore) -> Self {
        Self {
            service,
            tokens,
            format: OutputFormat::default(),
            articles: ArticleList::new(),
            synced: false,
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the local list with the server's
    async fn refresh(&mut self) -> anyhow::Result<()> {
        let articles = self.service.list_articles().await?;
        self.articles.replace(articles);
        self.synced = true;
        Ok(())
    }

    /// Load the list unless this context already has it
    async fn ensure_synced(&mut self) -> anyhow::Result<()> {
        if !self.synced {
            self.refresh().await?;
        }
        Ok(())
    }
}

/// Refuse commands that need a token when none is stored
pub fn ensure_session(command: &Command, token: Option<&str>) -> anyhow::Result<()> {
    if command.requires_session() && landing_route(token) == LOGIN_ROUTE {
        bail!("Not logged in. Run `quill login <username> --password <password>` first.");
    }
    Ok(())
}

/// Run one command, writing its output to `out`
pub async fn run(
    command: Command,
    ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let token = ctx
                .service
                .login(&Credentials::new(&username, password))
                .await
                .context("Login failed")?;
            ctx.tokens.save(&token)?;
            writeln!(out, "Logged in as {}", username)?;
        }

        Command::Register {
            username,
            email,
            password,
        } => {
            let token = ctx
                .service
                .register(&Registration::new(&username, email, password))
                .await
                .context("Registration failed")?;
            ctx.tokens.save(&token)?;
            writeln!(out, "Registered and logged in as {}", username)?;
        }

        Command::Logout => {
            // The local slot is cleared even if the server call fails.
            if let Err(e) = ctx.service.logout().await {
                tracing::warn!("Server logout failed: {}", e);
            }
            ctx.tokens.clear()?;
            writeln!(out, "Logged out")?;
        }

        Command::Whoami => {
            let user = ctx.service.current_user().await?;
            match ctx.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&user)?)?,
                OutputFormat::Table => {
                    writeln!(out, "{}", user.username)?;
                    if !user.email.is_empty() {
                        writeln!(out, "Email: {}", user.email)?;
                    }
                }
            }
        }

        Command::List => {
            ctx.refresh().await?;
            print_list(&ctx.articles, ctx.format, out)?;
        }

        Command::Show { slug } => {
            let article = ctx.service.get_article(&slug).await.map_err(not_found(&slug))?;
            let viewer = ctx.service.current_user().await.ok().map(|u| u.username);
            print_article(&article, viewer.as_deref(), ctx.format, out)?;
        }

        Command::Add { title, description } => {
            ctx.ensure_synced().await?;
            let article = ctx
                .service
                .create_article(&ArticleDraft::new(title, description))
                .await?;
            let message = format!("Published {}", article.slug);
            ctx.articles.insert(article);
            print_patched(&message, ctx, out)?;
        }

        Command::Update {
            slug,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                bail!("Nothing to update: pass --title and/or --description");
            }

            ctx.ensure_synced().await?;
            let current = ctx.service.get_article(&slug).await.map_err(not_found(&slug))?;
            let mut draft = current.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }

            let article = ctx
                .service
                .update_article(&slug, &draft)
                .await
                .map_err(not_found(&slug))?;
            let message = format!("Updated {}", article.slug);
            ctx.articles.update(&article);
            print_patched(&message, ctx, out)?;
        }

        Command::Delete { slug } => {
            ctx.ensure_synced().await?;
            ctx.service
                .delete_article(&slug)
                .await
                .map_err(not_found(&slug))?;
            ctx.articles.remove(&slug);
            print_patched(&format!("Deleted {}", slug), ctx, out)?;
        }

        Command::Config { output } => {
            let config = crate::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    writeln!(out, "Config written to {:?}", path)?;
                }
                None => {
                    write!(out, "{}", config)?;
                }
            }
        }
    }

    Ok(())
}

fn not_found(slug: &str) -> impl FnOnce(ClientError) -> anyhow::Error + '_ {
    move |e| match e {
        ClientError::NotFound => anyhow::anyhow!("No article with slug '{}'", slug),
        other => other.into(),
    }
}

/// Confirmation line, then the list as it stands after the change
fn print_patched(message: &str, ctx: &CommandContext<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    if ctx.format == OutputFormat::Table {
        writeln!(out, "{}", message)?;
        writeln!(out)?;
    }
    print_list(&ctx.articles, ctx.format, out)
}

fn print_list(list: &ArticleList, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(list.as_slice())?)?;
        return Ok(());
    }

    if list.is_empty() {
        writeln!(out, "No articles yet.")?;
        writeln!(out)?;
        writeln!(out, "Write the first one with:")?;
        writeln!(out, "  quill add --title \"Hello\" --description \"...\"")?;
        return Ok(());
    }

    writeln!(out, "{:<30} {:<30} {:<15} {}", "Slug", "Title", "Author", "Published")?;
    writeln!(out, "{}", "-".repeat(90))?;
    for article in list.iter() {
        writeln!(
            out,
            "{:<30} {:<30} {:<15} {}",
            truncate(&article.slug, 30),
            truncate(&article.title, 30),
            truncate(&article.author, 15),
            article.published_display()
        )?;
    }
    Ok(())
}

fn print_article(
    article: &Article,
    viewer: Option<&str>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(article)?)?;
        return Ok(());
    }

    writeln!(out, "{}", article.title)?;
    writeln!(
        out,
        "Published {} by {}",
        article.published_display(),
        article.author
    )?;
    writeln!(out)?;
    writeln!(out, "{}", article.description)?;

    if can_edit(viewer, article) {
        writeln!(out)?;
        writeln!(
            out,
            "You wrote this. Edit with `quill update {0}` or remove with `quill delete {0}`.",
            article.slug
        )?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use super::*;
    use crate::client::ClientResult;
    use crate::models::User;
    use crate::session::MemoryTokenStore;

    /// In-memory stand-in for the blog API
    struct FakeBlog {
        articles: Mutex<Vec<Article>>,
        user: &'static str,
    }

    impl FakeBlog {
        fn new() -> Self {
            Self {
                articles: Mutex::new(vec![
                    Article::new("one", "One").author("alice").description("first"),
                    Article::new("two", "Two").author("bob").description("second"),
                ]),
                user: "alice",
            }
        }
    }

    #[async_trait]
    impl BlogService for FakeBlog {
        async fn list_articles(&self) -> ClientResult<Vec<Article>> {
            Ok(self.articles.lock().unwrap().clone())
        }

        async fn get_article(&self, slug: &str) -> ClientResult<Article> {
            self.articles
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.slug == slug)
                .cloned()
                .ok_or(ClientError::NotFound)
        }

        async fn create_article(&self, draft: &ArticleDraft) -> ClientResult<Article> {
            let article = Article::new(draft.title.to_lowercase(), &draft.title)
                .description(&draft.description)
                .author(self.user);
            self.articles.lock().unwrap().push(article.clone());
            Ok(article)
        }

        async fn update_article(&self, slug: &str, draft: &ArticleDraft) -> ClientResult<Article> {
            let mut articles = self.articles.lock().unwrap();
            let article = articles
                .iter_mut()
                .find(|a| a.slug == slug)
                .ok_or(ClientError::NotFound)?;
            if article.author != self.user {
                return Err(ClientError::Forbidden);
            }
            article.title = draft.title.clone();
            article.description = draft.description.clone();
            Ok(article.clone())
        }

        async fn delete_article(&self, slug: &str) -> ClientResult<()> {
            let mut articles = self.articles.lock().unwrap();
            let before = articles.len();
            articles.retain(|a| a.slug != slug);
            if articles.len() == before {
                return Err(ClientError::NotFound);
            }
            Ok(())
        }

        async fn register(&self, _registration: &Registration) -> ClientResult<String> {
            Ok("new-token".to_string())
        }

        async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
            if credentials.password == "pw" {
                Ok("tok".to_string())
            } else {
                Err(ClientError::Api {
                    status: 400,
                    message: "Unable to log in with provided credentials.".to_string(),
                })
            }
        }

        async fn logout(&self) -> ClientResult<()> {
            Err(ClientError::Unavailable)
        }

        async fn current_user(&self) -> ClientResult<User> {
            Ok(User {
                username: self.user.to_string(),
                ..Default::default()
            })
        }
    }

    async fn run_capture(command: Command, ctx: &mut CommandContext<'_>) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(command, ctx, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_ensure_session() {
        assert!(ensure_session(&Command::List, None).is_err());
        assert!(ensure_session(&Command::List, Some("tok")).is_ok());
        assert!(ensure_session(&Command::Logout, None).is_ok());
        assert!(ensure_session(
            &Command::Login {
                username: "a".into(),
                password: "b".into()
            },
            None
        )
        .is_ok());
    }

    #[tokio::test]
    async fn test_login_saves_token() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::new();
        let mut ctx = CommandContext::new(&blog, &tokens);

        let output = run_capture(
            Command::Login {
                username: "alice".into(),
                password: "pw".into(),
            },
            &mut ctx,
        )
        .await
        .unwrap();

        assert_eq!(output, "Logged in as alice\n");
        assert_eq!(tokens.load().unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_slot_empty() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::new();
        let mut ctx = CommandContext::new(&blog, &tokens);

        let result = run_capture(
            Command::Login {
                username: "alice".into(),
                password: "wrong".into(),
            },
            &mut ctx,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(tokens.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_even_if_server_fails() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);

        run_capture(Command::Logout, &mut ctx).await.unwrap();

        assert_eq!(tokens.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_replaces_local_copy() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);
        ctx.articles.insert(Article::new("stale", "Stale"));

        let output = run_capture(Command::List, &mut ctx).await.unwrap();

        assert_eq!(ctx.articles.slugs(), vec!["one", "two"]);
        assert!(output.contains("one"));
        assert!(!output.contains("stale"));
    }

    #[tokio::test]
    async fn test_list_json() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens).format(OutputFormat::Json);

        let output = run_capture(Command::List, &mut ctx).await.unwrap();
        let parsed: Vec<Article> = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.len(), 2);
    }

    #[tokio::test]
    async fn test_add_then_delete_patch_list() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);
        run_capture(Command::List, &mut ctx).await.unwrap();

        run_capture(
            Command::Add {
                title: "Three".into(),
                description: "third".into(),
            },
            &mut ctx,
        )
        .await
        .unwrap();
        assert_eq!(ctx.articles.len(), 3);
        assert!(ctx.articles.contains("three"));

        run_capture(Command::Delete { slug: "one".into() }, &mut ctx)
            .await
            .unwrap();
        assert_eq!(ctx.articles.slugs(), vec!["two", "three"]);
    }

    #[tokio::test]
    async fn test_add_loads_list_before_patching() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);

        let output = run_capture(
            Command::Add {
                title: "Three".into(),
                description: "third".into(),
            },
            &mut ctx,
        )
        .await
        .unwrap();

        assert_eq!(ctx.articles.slugs(), vec!["one", "two", "three"]);
        assert!(output.starts_with("Published three\n"));
        assert!(output.contains("one"));
        assert!(output.contains("three"));
    }

    #[tokio::test]
    async fn test_delete_json_prints_patched_list() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens).format(OutputFormat::Json);

        let output = run_capture(Command::Delete { slug: "one".into() }, &mut ctx)
            .await
            .unwrap();
        let parsed: Vec<Article> = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].slug, "two");
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);
        run_capture(Command::List, &mut ctx).await.unwrap();

        run_capture(
            Command::Update {
                slug: "one".into(),
                title: Some("One, revised".into()),
                description: None,
            },
            &mut ctx,
        )
        .await
        .unwrap();

        let updated = ctx.articles.get("one").unwrap();
        assert_eq!(updated.title, "One, revised");
        assert_eq!(updated.description, "first");
    }

    #[tokio::test]
    async fn test_update_someone_elses_article_leaves_list() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);
        run_capture(Command::List, &mut ctx).await.unwrap();
        let before = ctx.articles.clone();

        let result = run_capture(
            Command::Update {
                slug: "two".into(),
                title: Some("Hijacked".into()),
                description: None,
            },
            &mut ctx,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(ctx.articles, before);
    }

    #[tokio::test]
    async fn test_delete_unknown_slug_message() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);

        let err = run_capture(Command::Delete { slug: "nope".into() }, &mut ctx)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No article with slug 'nope'");
    }

    #[tokio::test]
    async fn test_show_offers_edit_to_author_only() {
        let blog = FakeBlog::new();
        let tokens = MemoryTokenStore::with_token("tok");
        let mut ctx = CommandContext::new(&blog, &tokens);

        let own = run_capture(Command::Show { slug: "one".into() }, &mut ctx)
            .await
            .unwrap();
        let other = run_capture(Command::Show { slug: "two".into() }, &mut ctx)
            .await
            .unwrap();

        assert!(own.contains("You wrote this"));
        assert!(!other.contains("You wrote this"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
