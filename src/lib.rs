//! Chess-Results pairings scraper
//!
//! Turns Chess-Results player lists and pairing pages into normalized
//! [`Player`] and [`Pairing`] records ready for Lichess bulk pairing.
//!
//! ```no_run
//! use cr_pairings::{AppConfig, HttpFetcher, Scraper, ScraperOptions};
//!
//! # async fn run() -> cr_pairings::Result<()> {
//! let config = AppConfig::default();
//! let scraper = Scraper::new(HttpFetcher::from_config(&config)?, ScraperOptions::from_config(&config));
//! let players = scraper.get_players("https://s2.chess-results.com/tnr1.aspx?art=0").await?;
//! let pairings = scraper
//!     .get_pairings("https://s2.chess-results.com/tnr1.aspx?art=2&rd=1", Some(players.as_slice()))
//!     .await?;
//! println!("{}", cr_pairings::format_pairing_lines(&pairings));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod retry;
pub mod rounds;
pub mod scraper;
pub mod storage;
pub mod types;

pub use crate::config::AppConfig;
pub use crate::error::{Result, ScraperError};
pub use crate::rounds::filter_round;
pub use crate::scraper::{
    format_pairing_lines, parse_pairings, parse_players, set_cache_buster, set_results_per_page,
    CacheBuster, HtmlFetcher, HttpFetcher, Layout, Scraper, ScraperOptions,
};
pub use crate::storage::UrlStore;
pub use crate::types::{Pairing, Player, SavedPlayerUrls};
