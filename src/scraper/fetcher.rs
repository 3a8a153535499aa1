//! Page fetching through a CORS passthrough proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::Result;
use crate::scraper::proxy_url;

/// Source of raw page HTML
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// Fetch the body of `url` as text
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher, optionally routed through a CORS proxy
pub struct HttpFetcher {
    client: Client,
    proxy_base: Option<String>,
}

impl HttpFetcher {
    /// Create a fetcher; `proxy_base` of `None` fetches pages directly
    pub fn new(client: Client, proxy_base: Option<String>) -> Self {
        Self { client, proxy_base }
    }

    /// Build a fetcher from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()?;

        let proxy_base = config
            .proxy
            .enabled
            .then(|| config.proxy.base_url.clone());

        Ok(Self::new(client, proxy_base))
    }

    /// Address actually requested for `url`
    pub fn request_url(&self, url: &str) -> String {
        match &self.proxy_base {
            Some(base) => proxy_url(base, url),
            None => url.to_string(),
        }
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    /// Status codes are not inspected; an error page simply parses to nothing.
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let target = self.request_url(url);
        debug!("GET {}", target);

        let response = self.client.get(&target).send().await?;
        debug!("{} -> {}", url, response.status());

        Ok(response.text().await?)
    }
}
