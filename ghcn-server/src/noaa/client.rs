//! HTTP client for the NOAA GHCN-Daily feed.

use std::time::Duration;

use tracing::debug;

use super::error::FetchError;
use super::feed::{DEFAULT_BASE_URL, Fetch, FeedUrls};

/// Default request timeout. The inventory file is tens of megabytes.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the NOAA client.
#[derive(Debug, Clone)]
pub struct NoaaClientConfig {
    /// Base URL of the GHCN-Daily file tree
    pub base_url: String,
    /// Request timeout in seconds; an expired request is a fetch failure
    pub timeout_secs: u64,
}

impl NoaaClientConfig {
    /// Create a config pointing at the public GHCN-Daily bucket.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for mirrors and testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NoaaClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the NOAA GHCN-Daily file feed.
#[derive(Debug, Clone)]
pub struct NoaaClient {
    http: reqwest::Client,
    urls: FeedUrls,
}

impl NoaaClient {
    /// Create a new NOAA client.
    pub fn new(config: NoaaClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            urls: FeedUrls::new(config.base_url),
        })
    }

    /// URLs of the files this client reads.
    pub fn urls(&self) -> &FeedUrls {
        &self.urls
    }
}

impl Fetch for NoaaClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let http_error = |source: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            source,
        };

        debug!(url, "fetching feed file");
        let response = self.http.get(url).send().await.map_err(http_error)?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        debug!(url, bytes = body.len(), "fetched feed file");
        Ok(body)
    }
}
