//! NOAA feed error types.

/// Errors that can occur when fetching a NOAA feed file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The feed has no such file
    #[error("{url} not found")]
    NotFound { url: String },

    /// The feed answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Whether the feed reported the file as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Http { url, .. }
            | FetchError::NotFound { url }
            | FetchError::Status { url, .. } => url,
        }
    }
}
