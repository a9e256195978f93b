//! Feed locations and the fetch abstraction.

use std::future::Future;

use super::error::FetchError;

/// Public GHCN-Daily bucket on AWS open data.
pub const DEFAULT_BASE_URL: &str = "http://noaa-ghcn-pds.s3.amazonaws.com";

/// Something that can retrieve a remote text file.
///
/// A failure yields a [`FetchError`], never a partial body.
pub trait Fetch: Send + Sync {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// URLs of the three GHCN-Daily files the service reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    base_url: String,
}

impl FeedUrls {
    /// Create feed URLs rooted at `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fixed-width station metadata list.
    pub fn stations(&self) -> String {
        format!("{}/ghcnd-stations.txt", self.base_url)
    }

    /// Fixed-width per-element coverage inventory.
    pub fn inventory(&self) -> String {
        format!("{}/ghcnd-inventory.txt", self.base_url)
    }

    /// Daily observations CSV for one station.
    pub fn station_csv(&self, station_id: &str) -> String {
        format!("{}/csv/by_station/{}.csv", self.base_url, station_id)
    }
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
