//! NOAA GHCN-Daily feed access.
//!
//! The service reads three files from the GHCN-Daily tree: the fixed-width
//! station list, the fixed-width element inventory, and one CSV of daily
//! observations per station. Everything else in the crate sees the feed only
//! through the [`Fetch`] trait.

mod client;
mod error;
mod feed;
#[cfg(test)]
mod mock;

pub use client::{NoaaClient, NoaaClientConfig};
pub use error::FetchError;
pub use feed::{DEFAULT_BASE_URL, FeedUrls, Fetch};
#[cfg(test)]
pub use mock::MockFeed;
