//! Quill CLI
//!
//! Command-line client for the blog API:
//! - Log in, register, log out
//! - List and read articles
//! - Publish, edit, and delete your own articles

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::client::BlogClient;
use quill::commands::{self, Command, CommandContext, OutputFormat};
use quill::config::{Config, LoggingConfig};
use quill::session::TokenStore;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read and write articles on a REST blog from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Blog API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/quill/config.toml or ./quill.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load_with_env(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let tokens = config.token_store();
    let token = tokens.load()?;
    commands::ensure_session(&cli.command, token.as_deref())?;

    let mut client = BlogClient::new(config.api.client_config())?;
    client.set_token(token);
    tracing::debug!(base_url = %client.config().base_url, "Using blog API");

    let mut ctx = CommandContext::new(&client, &tokens).format(cli.format);
    let mut stdout = std::io::stdout();
    commands::run(cli.command, &mut ctx, &mut stdout).await
}

/// Set up tracing; `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("quill={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
