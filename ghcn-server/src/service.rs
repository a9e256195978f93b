//! Query operations behind the HTTP routes.

use std::sync::Arc;

use tracing::info;

use crate::catalog::{CatalogStore, InvalidStationId, validate_station_id};
use crate::noaa::{FeedUrls, Fetch, FetchError};
use crate::observations::{YearSummary, aggregate, parse_daily_csv};
use crate::proximity::{NearbyStation, ProximityQuery, find_nearby};

/// Errors from [`ClimateService::station_history`].
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error(transparent)]
    InvalidStationId(#[from] InvalidStationId),

    #[error("no daily data for station {station_id}")]
    UnknownStation { station_id: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Answers proximity and history queries.
///
/// Proximity queries read the current catalog snapshot. History queries
/// fetch the station's daily CSV on every call; nothing is cached between
/// requests.
pub struct ClimateService<F> {
    feed: F,
    urls: FeedUrls,
    catalog: Arc<CatalogStore>,
}

impl<F: Fetch> ClimateService<F> {
    pub fn new(feed: F, urls: FeedUrls, catalog: Arc<CatalogStore>) -> Self {
        Self {
            feed,
            urls,
            catalog,
        }
    }

    /// Stations near a point whose records span the requested years.
    pub async fn nearby_stations(&self, query: &ProximityQuery) -> Vec<NearbyStation> {
        let catalog = self.catalog.get().await;
        find_nearby(&catalog.stations, query)
    }

    /// Yearly and seasonal averages for one station, oldest year first.
    ///
    /// The most recent year present in the data is left out. A station whose
    /// CSV the feed does not have is reported as
    /// [`HistoryError::UnknownStation`].
    pub async fn station_history(
        &self,
        station_id: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearSummary>, HistoryError> {
        validate_station_id(station_id)?;

        let url = self.urls.station_csv(station_id);
        let raw = self.feed.fetch_text(&url).await.map_err(|e| {
            if e.is_not_found() {
                HistoryError::UnknownStation {
                    station_id: station_id.to_string(),
                }
            } else {
                HistoryError::Fetch(e)
            }
        })?;

        let observations = parse_daily_csv(&raw, start_year, end_year);
        let summaries = aggregate(&observations);
        info!(
            station_id,
            observations = observations.len(),
            years = summaries.len(),
            "station history computed"
        );
        Ok(summaries)
    }
}
