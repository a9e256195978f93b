//! Catalog persistence and refresh error types.

use std::path::PathBuf;

use crate::noaa::FetchError;

/// Errors that can occur when persisting the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the catalog file failed
    #[error("catalog I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the catalog
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The background write task panicked or was cancelled
    #[error("catalog write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Errors that abort a catalog refresh.
///
/// Neither variant leaves a partial catalog behind: fetch failures happen
/// before anything is written, and a failed write keeps the previous catalog.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// One of the NOAA feeds could not be fetched
    #[error("fetching station feeds failed: {0}")]
    Fetch(#[from] FetchError),

    /// The new catalog could not be persisted
    #[error("storing catalog failed: {0}")]
    Store(#[from] StoreError),
}
