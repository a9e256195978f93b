//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::proximity::ProximityQuery;

/// Path parameters of `/stations-within-radius`.
#[derive(Debug, Deserialize)]
pub struct NearbyPath {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub limit: usize,
    pub start_year: i32,
    pub end_year: i32,
}

impl From<NearbyPath> for ProximityQuery {
    fn from(p: NearbyPath) -> Self {
        ProximityQuery {
            latitude: p.latitude,
            longitude: p.longitude,
            radius_km: p.radius,
            limit: p.limit,
            start_year: p.start_year,
            end_year: p.end_year,
        }
    }
}

/// Path parameters of `/station-data`.
#[derive(Debug, Deserialize)]
pub struct HistoryPath {
    pub station_id: String,
    pub start_year: i32,
    pub end_year: i32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
