//! IOL - command-line client for the InvertirOnline brokerage API
//!
//! Main entry point for the `iol` CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod session;

use commands::{account, auth, instrument, portfolio, quotes};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// IOL - command-line client for the InvertirOnline brokerage API
#[derive(Parser)]
#[command(name = "iol")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL (default: from config, then https://api.invertironline.com)
    #[arg(long, global = true, env = "IOL_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication management
    Auth(auth::AuthArgs),

    /// Show portfolio holdings and totals
    Portfolio(portfolio::PortfolioArgs),

    /// Show market quotes for an instrument type
    Quotes(quotes::QuotesArgs),

    /// Show account balances
    Account(account::AccountArgs),

    /// Show details for a single instrument
    Instrument(instrument::InstrumentArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = iol_config::ConfigPaths::discover()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    // Initialize tracing - console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "iol=debug,iol_auth=debug,iol_client=debug,iol_config=debug,info"
    } else {
        "iol=info,iol_auth=info,iol_client=info,warn"
    };

    let file_appender = tracing_appender::rolling::daily(paths.logs_dir(), "iol.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(cli.verbose)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "iol=trace,iol_auth=trace,iol_client=trace,iol_config=trace,info",
                )),
        )
        .init();

    let loaded = paths.load();
    for warning in loaded.warnings() {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(sources = ?loaded.loaded_from(), "Config loaded");

    let base_url = cli
        .base_url
        .unwrap_or_else(|| loaded.config.base_url().to_string());

    let ctx = commands::Context {
        base_url,
        json_output: cli.json,
        verbose: cli.verbose,
        config: loaded.config,
        sessions: session::SessionStore::new(paths.config_dir()),
    };

    match cli.command {
        Commands::Auth(args) => auth::run(args, &ctx).await,
        Commands::Portfolio(args) => portfolio::run(args, &ctx).await,
        Commands::Quotes(args) => quotes::run(args, &ctx).await,
        Commands::Account(args) => account::run(args, &ctx).await,
        Commands::Instrument(args) => instrument::run(args, &ctx).await,
    }
}
