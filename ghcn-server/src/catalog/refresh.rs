//! Yearly station catalog refresh.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use futures::future::try_join;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::noaa::{FeedUrls, Fetch};

use super::error::RefreshError;
use super::parse::{parse_inventory, parse_stations};
use super::store::CatalogStore;
use super::types::Catalog;

/// What a refresh attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The catalog was already refreshed this calendar year.
    Skipped,
    /// A new catalog with this many stations was stored.
    Refreshed { stations: usize },
    /// The attempt failed; the previous catalog is still in effect.
    Failed,
}

/// Rebuilds the station catalog from the NOAA feed at most once a year.
///
/// Refreshes are serialized: a caller that arrives while another refresh is
/// running waits for it, then sees the updated `last_update` and skips.
pub struct CatalogRefresher<F> {
    feed: F,
    urls: FeedUrls,
    store: Arc<CatalogStore>,
    running: Mutex<()>,
}

impl<F: Fetch> CatalogRefresher<F> {
    pub fn new(feed: F, urls: FeedUrls, store: Arc<CatalogStore>) -> Self {
        Self {
            feed,
            urls,
            store,
            running: Mutex::new(()),
        }
    }

    /// The store this refresher writes to.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Refresh using today's local date.
    ///
    /// Never fails: errors are logged and the old catalog stays in effect
    /// until the next successful attempt.
    pub async fn refresh(&self) -> RefreshOutcome {
        let today = Local::now().date_naive();
        match self.refresh_on(today).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "station catalog refresh failed");
                RefreshOutcome::Failed
            }
        }
    }

    /// Refresh as if today were `today`.
    ///
    /// Skips without any network activity if the stored catalog was last
    /// updated in the same calendar year. Otherwise fetches both feed files,
    /// and only if both arrive parses them and stores the new catalog.
    pub async fn refresh_on(&self, today: NaiveDate) -> Result<RefreshOutcome, RefreshError> {
        let _running = self.running.lock().await;

        let current = self.store.get().await;
        if is_current(&current, today) {
            info!(
                last_update = ?current.last_update,
                "station catalog is current, skipping refresh"
            );
            return Ok(RefreshOutcome::Skipped);
        }

        info!("refreshing station catalog");
        let stations_url = self.urls.stations();
        let inventory_url = self.urls.inventory();
        let (stations_text, inventory_text) = try_join(
            self.feed.fetch_text(&stations_url),
            self.feed.fetch_text(&inventory_url),
        )
        .await?;

        let stations = parse_inventory(&inventory_text, parse_stations(&stations_text));
        let count = stations.len();

        self.store.set(Catalog::new(today, stations)).await?;
        info!(stations = count, "station catalog refreshed");

        Ok(RefreshOutcome::Refreshed { stations: count })
    }
}

/// Whether `catalog` was refreshed in the calendar year of `today`.
fn is_current(catalog: &Catalog, today: NaiveDate) -> bool {
    catalog
        .last_update
        .is_some_and(|last| last.year() == today.year())
}
