//! Nearest-station search over the catalog.

use serde::Serialize;

use crate::catalog::Station;
use crate::geo::distance_km;

/// Parameters for a proximity search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    /// Centre of the search, degrees.
    pub latitude: f64,
    pub longitude: f64,

    /// Maximum great-circle distance, kilometres (inclusive).
    pub radius_km: f64,

    /// Maximum number of stations to return.
    pub limit: usize,

    /// Station records must cover every year in `start_year..=end_year`.
    pub start_year: i32,
    pub end_year: i32,
}

/// A station matched by a proximity search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStation {
    #[serde(flatten)]
    pub station: Station,

    /// Distance from the search centre, kilometres.
    pub distance: f64,
}

/// Find stations near a point, closest first.
///
/// A station qualifies when it is within `radius_km` and its TMAX/TMIN
/// coverage spans the whole requested year range (overlap is not enough).
/// Equal distances keep catalog order. An empty result is not an error.
pub fn find_nearby(stations: &[Station], query: &ProximityQuery) -> Vec<NearbyStation> {
    if query.limit == 0 {
        return Vec::new();
    }

    let mut matches: Vec<(f64, &Station)> = stations
        .iter()
        .filter(|s| s.covers(query.start_year, query.end_year))
        .filter_map(|s| {
            let distance = distance_km(query.latitude, query.longitude, s.latitude, s.longitude);
            (distance <= query.radius_km).then_some((distance, s))
        })
        .collect();

    // `sort_by` is stable, so ties stay in catalog order.
    matches.sort_by(|a, b| a.0.total_cmp(&b.0));
    matches.truncate(query.limit);

    matches
        .into_iter()
        .map(|(distance, station)| NearbyStation {
            station: station.clone(),
            distance,
        })
        .collect()
}
