//! Configuration for the pairings scraper.

use serde::{Deserialize, Serialize};

use crate::scraper::{DEFAULT_PROXY_URL, DEFAULT_RESULTS_PER_PAGE};

/// CORS proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_proxy_url")]
    pub base_url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_proxy_url() -> String {
    DEFAULT_PROXY_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_proxy_url(),
            enabled: default_true(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries on fetch failure, applied by the command-line front end
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_user_agent() -> String {
    concat!("cr-pairings/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// Scrape behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,
    #[serde(default)]
    pub cache_bust: bool,
}

fn default_results_per_page() -> u32 {
    DEFAULT_RESULTS_PER_PAGE
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            results_per_page: default_results_per_page(),
            cache_bust: false,
        }
    }
}

/// Saved URL store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "data/saved_urls.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (PAIRINGS__PROXY__BASE_URL, etc.)
            .add_source(
                config::Environment::with_prefix("PAIRINGS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.proxy.base_url, "https://corsproxy.io/");
        assert!(config.proxy.enabled);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.scraper.results_per_page, 99999);
        assert!(!config.scraper.cache_bust);
        assert_eq!(config.store.path, "data/saved_urls.json");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"proxy": {"enabled": false}, "scraper": {"cache_bust": true}}"#).unwrap();

        assert!(!config.proxy.enabled);
        assert_eq!(config.proxy.base_url, "https://corsproxy.io/");
        assert!(config.scraper.cache_bust);
        assert_eq!(config.http.max_retries, 3);
    }
}
