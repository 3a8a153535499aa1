//! Web scraper module for Chess-Results pairing and player pages
//!
//! Provides page fetching through a CORS proxy, URL helpers, a typed DOM
//! walker and the table parsers.

pub mod client;
pub mod columns;
pub mod dom;
pub mod fetcher;
pub mod parsers;

pub use client::{Scraper, ScraperOptions};
pub use columns::{ColumnMap, ColumnSpan};
pub use fetcher::{HtmlFetcher, HttpFetcher};
pub use parsers::{format_pairing_lines, parse_pairings, parse_players, Layout};

use std::sync::atomic::{AtomicU64, Ordering};

use url::{form_urlencoded, Url};

use crate::error::{Result, ScraperError};

/// Default public CORS proxy
pub const DEFAULT_PROXY_URL: &str = "https://corsproxy.io/";

/// Query parameter Chess-Results uses for rows per page
pub const RESULTS_PER_PAGE_PARAM: &str = "zeilen";

/// Query parameter used to defeat upstream caching
pub const CACHE_BUST_PARAM: &str = "cachebust";

/// Enough rows to get a whole tournament on one page
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 99999;

/// Build the proxied URL: `<proxy>?<percent-encoded target>`
pub fn proxy_url(proxy_base: &str, target: &str) -> String {
    format!("{}?{}", proxy_base, urlencoding::encode(target))
}

/// Set the rows-per-page parameter, replacing any existing value
pub fn set_results_per_page(url: &str, results_per_page: u32) -> Result<String> {
    set_query_param(url, RESULTS_PER_PAGE_PARAM, &results_per_page.to_string())
}

/// Set the cache-busting parameter, replacing any existing value
pub fn set_cache_buster(url: &str, value: u64) -> Result<String> {
    set_query_param(url, CACHE_BUST_PARAM, &value.to_string())
}

/// Set `key=value` in the query string.
///
/// The first existing occurrence keeps its position, later duplicates are
/// dropped; a missing key is appended. Path and the raw text of other
/// parameters are left as they are.
pub fn set_query_param(url: &str, key: &str, value: &str) -> Result<String> {
    let mut parsed = Url::parse(url).map_err(|source| ScraperError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let assignment = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();

    let mut segments: Vec<String> = Vec::new();
    let mut replaced = false;
    for segment in parsed.query().unwrap_or("").split('&').filter(|s| !s.is_empty()) {
        let name = form_urlencoded::parse(segment.as_bytes()).next().map(|(k, _)| k);
        if name.as_deref() == Some(key) {
            if !replaced {
                segments.push(assignment.clone());
                replaced = true;
            }
        } else {
            segments.push(segment.to_string());
        }
    }
    if !replaced {
        segments.push(assignment);
    }

    parsed.set_query(Some(&segments.join("&")));
    Ok(parsed.to_string())
}

/// Monotonic cache-buster values, seeded from the wall clock
#[derive(Debug)]
pub struct CacheBuster {
    next: AtomicU64,
}

impl CacheBuster {
    /// Start counting from the given value
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// Start counting from the current time in milliseconds
    pub fn from_clock() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self::starting_at(millis)
    }

    /// Next value; strictly greater than every previous one
    pub fn next_value(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Apply the next value to a URL
    pub fn apply(&self, url: &str) -> Result<String> {
        set_cache_buster(url, self.next_value())
    }
}
