//! Station catalog types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of a GHCN-Daily station identifier.
pub const MAX_STATION_ID_LEN: usize = 11;

/// A weather station from the GHCN-Daily station list.
///
/// `min_year`/`max_year` are the years for which *both* TMAX and TMIN are on
/// record: the latest first year and the earliest last year across the two
/// elements. They are `None` only while the catalog is being built; stations
/// without coverage never make it into a [`Catalog`].
///
/// Field names on the wire follow the `stations.json` layout used by the web
/// frontend (`mindate`/`maxdate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub state: Option<String>,
    pub name: String,
    #[serde(rename = "mindate")]
    pub min_year: Option<i32>,
    #[serde(rename = "maxdate")]
    pub max_year: Option<i32>,
}

impl Station {
    /// Both year bounds, if the station has TMAX/TMIN coverage.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((self.min_year?, self.max_year?))
    }

    /// Whether the station has records covering every year in `start..=end`.
    pub fn covers(&self, start_year: i32, end_year: i32) -> bool {
        self.year_bounds()
            .is_some_and(|(min, max)| min <= start_year && max >= end_year)
    }
}

/// The persisted station catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Date of the last successful refresh, `None` if never refreshed.
    #[serde(default)]
    pub last_update: Option<NaiveDate>,

    #[serde(default)]
    pub stations: Vec<Station>,
}

impl Catalog {
    /// Create a catalog stamped with the refresh date.
    pub fn new(last_update: NaiveDate, stations: Vec<Station>) -> Self {
        Self {
            last_update: Some(last_update),
            stations,
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Error returned for a station identifier that cannot name a GHCN station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {id:?}: {reason}")]
pub struct InvalidStationId {
    id: String,
    reason: &'static str,
}

/// Check that `id` looks like a GHCN-Daily station identifier.
///
/// Identifiers are 1 to 11 ASCII letters or digits. Anything else is rejected
/// before it is interpolated into a feed URL.
pub fn validate_station_id(id: &str) -> Result<(), InvalidStationId> {
    if id.is_empty() || id.len() > MAX_STATION_ID_LEN {
        return Err(InvalidStationId {
            id: id.to_string(),
            reason: "must be 1 to 11 characters",
        });
    }

    if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(InvalidStationId {
            id: id.to_string(),
            reason: "must be ASCII letters and digits",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(min_year: Option<i32>, max_year: Option<i32>) -> Station {
        Station {
            id: "GME00129634".to_string(),
            latitude: 48.0458,
            longitude: 8.4617,
            elevation: Some(720.0),
            state: None,
            name: "VILLINGEN-SCHWENNINGEN".to_string(),
            min_year,
            max_year,
        }
    }

    #[test]
    fn covers_requires_full_range() {
        let s = station(Some(1947), Some(2025));
        assert!(s.covers(1990, 2024));
        assert!(s.covers(1947, 2025));
        assert!(!s.covers(1946, 2000));
        assert!(!s.covers(2000, 2026));
    }

    #[test]
    fn covers_without_bounds_is_false() {
        assert!(!station(None, Some(2025)).covers(2000, 2001));
        assert!(!station(Some(1950), None).covers(2000, 2001));
    }

    #[test]
    fn serializes_with_frontend_field_names() {
        let json = serde_json::to_value(station(Some(1947), Some(2025))).unwrap();
        assert_eq!(json["mindate"], 1947);
        assert_eq!(json["maxdate"], 2025);
        assert!(json["state"].is_null());
        assert!(json.get("min_year").is_none());
    }

    #[test]
    fn catalog_json_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let catalog = Catalog::new(date, vec![station(Some(1947), Some(2025))]);

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("\"last_update\":\"2025-03-01\""));

        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn empty_object_decodes_to_empty_catalog() {
        let catalog: Catalog = serde_json::from_str("{}").unwrap();
        assert_eq!(catalog, Catalog::default());
        assert!(catalog.is_empty());
    }

    #[test]
    fn valid_station_ids() {
        assert!(validate_station_id("GME00129634").is_ok());
        assert!(validate_station_id("USW00094728").is_ok());
        assert!(validate_station_id("A").is_ok());
    }

    #[test]
    fn invalid_station_ids() {
        assert!(validate_station_id("").is_err());
        assert!(validate_station_id("GME001296340").is_err());
        assert!(validate_station_id("../secrets").is_err());
        assert!(validate_station_id("GME 0012963").is_err());
    }
}
