//! High-level scrape operations: fetch a page, then parse it.

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::scraper::fetcher::HtmlFetcher;
use crate::scraper::parsers::{parse_pairings, parse_players};
use crate::scraper::{set_results_per_page, CacheBuster, DEFAULT_RESULTS_PER_PAGE};
use crate::types::{Pairing, Player};

/// Scrape behaviour
#[derive(Debug)]
pub struct ScraperOptions {
    /// Rows per page requested for player lists
    pub results_per_page: u32,
    /// Cache-buster applied to pairings fetches
    pub cache_buster: Option<CacheBuster>,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            cache_buster: None,
        }
    }
}

impl ScraperOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            results_per_page: config.scraper.results_per_page,
            cache_buster: config.scraper.cache_bust.then(CacheBuster::from_clock),
        }
    }
}

/// Player and pairing scraper over an injected fetcher
pub struct Scraper<F> {
    fetcher: F,
    options: ScraperOptions,
}

impl<F: HtmlFetcher> Scraper<F> {
    pub fn new(fetcher: F, options: ScraperOptions) -> Self {
        Self { fetcher, options }
    }

    /// Fetch a player list, all rows on one page
    pub async fn get_players(&self, url: &str) -> Result<Vec<Player>> {
        let url = set_results_per_page(url, self.options.results_per_page)?;
        info!("Fetching players from {}", url);

        let html = self.fetcher.fetch_html(&url).await?;
        let players = parse_players(&html);

        info!("Found {} players", players.len());
        Ok(players)
    }

    /// Fetch pairings, enriching sides from `players` when given
    pub async fn get_pairings(&self, url: &str, players: Option<&[Player]>) -> Result<Vec<Pairing>> {
        let url = match &self.options.cache_buster {
            Some(buster) => buster.apply(url)?,
            None => url.to_string(),
        };
        info!("Fetching pairings from {}", url);

        let html = self.fetcher.fetch_html(&url).await?;
        parse_pairings(&html, players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages and records requested URLs
    struct FixtureFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FixtureFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HtmlFetcher for FixtureFetcher {
        async fn fetch_html(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ScraperError::Io(std::io::Error::other(format!("Unexpected URL: {}", url))))
        }
    }

    const PLAYERS_HTML: &str = r#"<table class="CRs1">
  <tr><th>No.</th><th>Name</th><th>FideID</th><th>Rtg</th><th>Club/City</th></tr>
  <tr><td>1</td><td>Giri, Anish</td><td>24116068</td><td>2745</td><td>AnishGiri</td></tr>
  <tr><td>2</td><td>Navara, David</td><td>309095</td><td>2679</td><td>RealDavidNavara</td></tr>
</table>"#;

    const PAIRINGS_HTML: &str = r#"<table class="CRs1">
  <tr><th>Bo.</th><th>Name</th><th>Result</th><th>Name</th></tr>
  <tr><td>1</td><td>Navara, David</td><td>-</td><td>Giri, Anish</td></tr>
  <tr><td>2</td><td>Unknown, Player</td><td>-</td><td>Other, Player</td></tr>
</table>"#;

    fn scraper(options: ScraperOptions) -> Scraper<FixtureFetcher> {
        let fetcher = FixtureFetcher::new(&[
            ("https://example.com/players.aspx?zeilen=99999", PLAYERS_HTML),
            ("https://example.com/pairings.aspx", PAIRINGS_HTML),
            ("https://example.com/pairings.aspx?cachebust=5", PAIRINGS_HTML),
        ]);
        Scraper::new(fetcher, options)
    }

    #[tokio::test]
    async fn test_get_players_requests_all_rows() {
        let scraper = scraper(ScraperOptions::default());
        let players = scraper.get_players("https://example.com/players.aspx").await.unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[1].lichess.as_deref(), Some("RealDavidNavara"));
    }

    #[tokio::test]
    async fn test_get_pairings_with_players() {
        let scraper = scraper(ScraperOptions::default());
        let players = scraper.get_players("https://example.com/players.aspx").await.unwrap();
        let pairings = scraper
            .get_pairings("https://example.com/pairings.aspx", Some(players.as_slice()))
            .await
            .unwrap();

        assert_eq!(pairings.len(), 2);
        assert_eq!(pairings[0].white, players[1]);
        assert_eq!(pairings[0].black, players[0]);
        assert_eq!(pairings[1].white, Player::named("Unknown, Player"));
    }

    #[tokio::test]
    async fn test_get_pairings_applies_cache_buster() {
        let scraper = scraper(ScraperOptions {
            cache_buster: Some(CacheBuster::starting_at(5)),
            ..Default::default()
        });
        let pairings = scraper
            .get_pairings("https://example.com/pairings.aspx", None)
            .await
            .unwrap();

        assert_eq!(pairings.len(), 2);
        let requested = scraper.fetcher.requested.lock().unwrap();
        assert_eq!(requested.as_slice(), ["https://example.com/pairings.aspx?cachebust=5"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let scraper = scraper(ScraperOptions::default());
        let result = scraper.get_pairings("https://example.com/missing.aspx", None).await;
        assert!(result.is_err());
    }
}
