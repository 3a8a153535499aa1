//! CLI commands for cr-pairings.
//!
//! Scrapes players and pairings, and manages the saved URLs of bulk pairings.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cr_pairings::retry::{retry_scrape, RetryConfig};
use cr_pairings::{
    filter_round, format_pairing_lines, AppConfig, HttpFetcher, Pairing, Player, Scraper, ScraperOptions,
    UrlStore,
};

#[derive(Parser)]
#[command(name = "cr-pairings")]
#[command(version, about = "Scrape Chess-Results pairings for Lichess bulk pairing", long_about = None)]
pub struct Cli {
    /// Fetch pages directly instead of through the CORS proxy
    #[arg(long, global = true)]
    pub no_proxy: bool,

    /// CORS proxy base URL override
    #[arg(long, global = true, value_name = "URL")]
    pub proxy: Option<String>,

    /// Saved URL store override
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape a player list page
    Players {
        /// Chess-Results player list URL
        #[arg(value_name = "URL")]
        url: String,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Scrape a pairings page
    Pairings {
        /// Chess-Results pairings URL
        #[arg(value_name = "URL")]
        url: String,

        /// Player list URL used to fill in usernames and ratings
        #[arg(short, long)]
        players_url: Option<String>,

        /// Only keep this round (1-based)
        #[arg(short, long)]
        round: Option<u32>,

        /// Add a cache-busting parameter to the pairings request
        #[arg(long)]
        cache_bust: bool,

        /// Output format (json, table, lines)
        #[arg(short, long, default_value = "lines")]
        format: String,
    },

    /// Remember the URLs used for a bulk pairing
    SaveUrls {
        /// Bulk pairing id
        id: String,
        /// Pairings URL
        pairings_url: String,
        /// Player list URL
        players_url: Option<String>,
    },

    /// Show the URLs saved for a bulk pairing
    GetUrls {
        /// Bulk pairing id
        id: String,
    },

    /// Forget all saved URLs
    ClearUrls,
}

/// Load configuration and apply global flags
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;

    if cli.no_proxy {
        config.proxy.enabled = false;
    }
    if let Some(proxy) = &cli.proxy {
        config.proxy.base_url = proxy.clone();
        config.proxy.enabled = true;
    }
    if let Some(path) = &cli.store {
        config.store.path = path.to_string_lossy().to_string();
    }

    Ok(config)
}

fn build_scraper(config: &AppConfig) -> anyhow::Result<Scraper<HttpFetcher>> {
    let fetcher = HttpFetcher::from_config(config).context("Failed to build HTTP client")?;
    Ok(Scraper::new(fetcher, ScraperOptions::from_config(config)))
}

/// Scrape and print a player list.
pub async fn run_players(config: AppConfig, url: String, format: String) -> anyhow::Result<()> {
    let scraper = build_scraper(&config)?;
    let retry = RetryConfig::from_http(&config.http);

    let players = retry_scrape(&retry, "player list", || scraper.get_players(&url))
        .await
        .with_context(|| format!("Failed to scrape players from {}", url))?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&players)?),
        "table" => print_players_table(&players),
        _ => {
            tracing::warn!("Unknown format: {}. Using JSON.", format);
            println!("{}", serde_json::to_string_pretty(&players)?);
        }
    }

    Ok(())
}

/// Scrape and print pairings.
pub async fn run_pairings(
    mut config: AppConfig,
    url: String,
    players_url: Option<String>,
    round: Option<u32>,
    cache_bust: bool,
    format: String,
) -> anyhow::Result<()> {
    if cache_bust {
        config.scraper.cache_bust = true;
    }
    let scraper = build_scraper(&config)?;
    let retry = RetryConfig::from_http(&config.http);

    let players = match &players_url {
        Some(players_url) => Some(
            retry_scrape(&retry, "player list", || scraper.get_players(players_url))
                .await
                .with_context(|| format!("Failed to scrape players from {}", players_url))?,
        ),
        None => None,
    };

    let mut pairings = retry_scrape(&retry, "pairings", || scraper.get_pairings(&url, players.as_deref()))
        .await
        .with_context(|| format!("Failed to scrape pairings from {}", url))?;

    if let Some(round) = round {
        pairings = filter_round(&pairings, round);
        tracing::info!("{} pairings in round {}", pairings.len(), round);
    }

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&pairings)?),
        "table" => print_pairings_table(&pairings),
        "lines" => println!("{}", format_pairing_lines(&pairings)),
        _ => {
            tracing::warn!("Unknown format: {}. Using JSON.", format);
            println!("{}", serde_json::to_string_pretty(&pairings)?);
        }
    }

    Ok(())
}

/// Save URLs for a bulk pairing.
pub fn run_save_urls(
    config: &AppConfig,
    id: &str,
    pairings_url: &str,
    players_url: Option<&str>,
) -> anyhow::Result<()> {
    let store = UrlStore::new(PathBuf::from(&config.store.path));
    store
        .save_urls(id, pairings_url, players_url)
        .with_context(|| format!("Failed to save URLs to {}", config.store.path))?;
    tracing::info!("Saved URLs for {}", id);
    Ok(())
}

/// Print URLs saved for a bulk pairing.
pub fn run_get_urls(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let store = UrlStore::new(PathBuf::from(&config.store.path));
    match store.get_urls(id) {
        Some(saved) => println!("{}", serde_json::to_string_pretty(&saved)?),
        None => eprintln!("No URLs saved for {}", id),
    }
    Ok(())
}

/// Remove all saved URLs.
pub fn run_clear_urls(config: &AppConfig) -> anyhow::Result<()> {
    let store = UrlStore::new(PathBuf::from(&config.store.path));
    store
        .clear()
        .with_context(|| format!("Failed to clear {}", config.store.path))?;
    Ok(())
}

fn print_players_table(players: &[Player]) {
    println!("=== Players ({}) ===", players.len());
    for (i, p) in players.iter().enumerate() {
        println!(
            "  {:3}. {:<32} {:>5} {:>10} {:<20} {}",
            i + 1,
            p.name,
            p.rating.map(|r| r.to_string()).unwrap_or_default(),
            p.fide_id.as_deref().unwrap_or(""),
            p.lichess.as_deref().unwrap_or(""),
            p.team.as_deref().unwrap_or("")
        );
    }
}

fn print_pairings_table(pairings: &[Pairing]) {
    println!("=== Pairings ({}) ===", pairings.len());
    for p in pairings {
        println!(
            "  {:>6}  {:<32} - {:<32}{}",
            p.board,
            p.white.bulk_handle(),
            p.black.bulk_handle(),
            if p.reversed { "  (black listed first)" } else { "" }
        );
    }
}
