//! cr-pairings
//!
//! CLI for scraping Chess-Results pairings into Lichess bulk-pairing input.

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cr_pairings=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(&cli)?;
    tracing::debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Players { url, format } => cli::run_players(config, url, format).await,
        Commands::Pairings {
            url,
            players_url,
            round,
            cache_bust,
            format,
        } => cli::run_pairings(config, url, players_url, round, cache_bust, format).await,
        Commands::SaveUrls {
            id,
            pairings_url,
            players_url,
        } => cli::run_save_urls(&config, &id, &pairings_url, players_url.as_deref()),
        Commands::GetUrls { id } => cli::run_get_urls(&config, &id),
        Commands::ClearUrls => cli::run_clear_urls(&config),
    }
}
