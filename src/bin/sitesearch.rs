//! CLI binary for sitesearch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sitesearch::{ConsoleDisplay, HostConfig, open_orchestrator};
use sitesearch_core::{Interaction, SearchState};

/// Run the site search widget headlessly and print its markup.
#[derive(Parser)]
#[command(name = "sitesearch", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "SITESEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search both indexes and print the rendered results.
    Search {
        /// Search query. Falls back to the `q` parameter of the configured page URL.
        query: Option<String>,

        /// Show this page (numbered pagination).
        #[arg(long, conflicts_with = "load_more")]
        page: Option<usize>,

        /// Activate "Load More" this many times.
        #[arg(long)]
        load_more: Option<usize>,
    },

    /// Print rendered autocomplete suggestions for a partial query.
    Suggest {
        /// Partial query.
        prefix: String,
    },

    /// Print the visitor identity and a valid session token.
    Token,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sitesearch::init_logging();

    let cli = Cli::parse();
    let config = HostConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Search {
            query,
            page,
            load_more,
        } => run_search(&config, query.as_deref(), page, load_more).await,
        Command::Suggest { prefix } => run_suggest(&config, &prefix).await,
        Command::Token => run_token(&config).await,
    }
}

async fn run_search(
    config: &HostConfig,
    query: Option<&str>,
    page: Option<usize>,
    load_more: Option<usize>,
) -> anyhow::Result<()> {
    let orchestrator = open_orchestrator(config)?;
    let location = config.page_location()?;
    let display = ConsoleDisplay::new(config.host.spinner);

    let state = orchestrator
        .submit(query, location.as_ref(), &display)
        .await;
    if state == SearchState::Idle {
        anyhow::bail!("no query given and the page URL has no `q` parameter");
    }

    if let Some(page) = page {
        orchestrator
            .interact(&Interaction::GoToPage(page), &display)
            .await;
    }
    for _ in 0..load_more.unwrap_or(0) {
        orchestrator.interact(&Interaction::LoadMore, &display).await;
    }

    if let Some(output) = display.current() {
        println!("{}", output.html());
        for binding in &output.bindings {
            tracing::info!(selector = %binding.selector, action = ?binding.action, "binding");
        }
    }

    if state == SearchState::Failed {
        anyhow::bail!("search failed");
    }
    Ok(())
}

async fn run_suggest(config: &HostConfig, prefix: &str) -> anyhow::Result<()> {
    let orchestrator = open_orchestrator(config)?;
    let output = orchestrator.suggest(prefix).await;
    if output.is_empty() {
        eprintln!("no suggestions");
    } else {
        println!("{}", output.html());
    }
    Ok(())
}

async fn run_token(config: &HostConfig) -> anyhow::Result<()> {
    let orchestrator = open_orchestrator(config)?;
    let tokens = orchestrator.tokens();
    println!("visitor: {}", tokens.visitor_id());
    match tokens.get_token().await {
        Some(token) => {
            if let Some(exp) = sitesearch_core::token::token_expiry(&token) {
                println!("expires: {exp}");
            }
            println!("token: {token}");
            Ok(())
        }
        None => anyhow::bail!("token issuance failed"),
    }
}
