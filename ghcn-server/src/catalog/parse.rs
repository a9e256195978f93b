//! Fixed-width parsers for `ghcnd-stations.txt` and `ghcnd-inventory.txt`.
//!
//! Both files are one record per line with fields at fixed column offsets.
//! A line that is too short or has an unparseable numeric field is skipped;
//! one bad line never aborts a parse.

use std::collections::HashMap;

use tracing::debug;

use super::types::Station;

/// Shortest station line that carries every field.
const MIN_STATION_LINE_LEN: usize = 85;

/// Shortest inventory line that carries every field.
const MIN_INVENTORY_LINE_LEN: usize = 45;

/// Elements whose coverage determines a station's year bounds.
const TEMPERATURE_ELEMENTS: [&str; 2] = ["TMAX", "TMIN"];

/// Stations keyed by id, iterated in first-insertion order.
///
/// Re-inserting an existing id replaces the record in place, so the position
/// of the first occurrence is kept while the last occurrence's values win.
#[derive(Debug, Clone, Default)]
pub struct StationMap {
    stations: Vec<Station>,
    index: HashMap<String, usize>,
}

impl StationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a station, replacing any earlier record with the same id.
    pub fn insert(&mut self, station: Station) {
        match self.index.get(&station.id) {
            Some(&i) => self.stations[i] = station,
            None => {
                self.index.insert(station.id.clone(), self.stations.len());
                self.stations.push(station);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&i| &self.stations[i])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Station> {
        let i = *self.index.get(id)?;
        Some(&mut self.stations[i])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn into_vec(self) -> Vec<Station> {
        self.stations
    }
}

/// Trimmed text of the half-open column range `start..end`.
///
/// `None` if the range is out of bounds or splits a multi-byte character.
fn column(line: &str, start: usize, end: usize) -> Option<&str> {
    line.get(start..end.min(line.len())).map(str::trim)
}

/// Trimmed column, with an empty field read as absent.
fn optional_column(line: &str, start: usize, end: usize) -> Option<Option<&str>> {
    column(line, start, end).map(|s| (!s.is_empty()).then_some(s))
}

/// Parse one line of `ghcnd-stations.txt`.
///
/// Columns (0-indexed, half-open): id 0..11, latitude 12..20, longitude
/// 21..30, elevation 31..37, state 38..40, name 41..71.
fn parse_station_line(line: &str) -> Option<Station> {
    // Byte length; the NOAA files are ASCII, so bytes and characters agree.
    if line.len() < MIN_STATION_LINE_LEN {
        return None;
    }

    let id = column(line, 0, 11)?;
    let latitude = column(line, 12, 20)?.parse::<f64>().ok()?;
    let longitude = column(line, 21, 30)?.parse::<f64>().ok()?;
    let elevation = match optional_column(line, 31, 37)? {
        Some(s) => Some(s.parse::<f64>().ok()?),
        None => None,
    };
    let state = optional_column(line, 38, 40)?.map(str::to_string);
    let name = column(line, 41, 71)?;

    Some(Station {
        id: id.to_string(),
        latitude,
        longitude,
        elevation,
        state,
        name: name.to_string(),
        min_year: None,
        max_year: None,
    })
}

/// Parse the station list into a map keyed by station id.
///
/// Every station starts without year bounds; see [`parse_inventory`].
pub fn parse_stations(raw: &str) -> StationMap {
    let mut stations = StationMap::new();
    let mut skipped = 0usize;

    for line in raw.lines() {
        match parse_station_line(line) {
            Some(station) => stations.insert(station),
            None => skipped += 1,
        }
    }

    debug!(
        parsed = stations.len(),
        skipped, "parsed station metadata"
    );
    stations
}

/// One TMAX/TMIN coverage range from the inventory file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Coverage<'a> {
    station_id: &'a str,
    first_year: i32,
    last_year: i32,
}

/// A year column: ASCII digits only, and non-zero.
fn parse_year(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i32>().ok().filter(|&y| y != 0)
}

/// Parse one line of `ghcnd-inventory.txt`, keeping only temperature elements.
///
/// Columns: id 0..11, element 31..35, first year 36..40, last year 41..45.
fn parse_inventory_line(line: &str) -> Option<Coverage<'_>> {
    // Byte length, as for station lines.
    if line.len() < MIN_INVENTORY_LINE_LEN {
        return None;
    }

    let station_id = column(line, 0, 11)?;
    let element = column(line, 31, 35)?;
    if !TEMPERATURE_ELEMENTS.contains(&element) {
        return None;
    }

    Some(Coverage {
        station_id,
        first_year: parse_year(column(line, 36, 40)?)?,
        last_year: parse_year(column(line, 41, 45)?)?,
    })
}

/// Merge inventory coverage into `stations` and return the covered stations.
///
/// For each TMAX/TMIN line the station's `min_year` becomes the latest first
/// year seen and `max_year` the earliest last year, i.e. the span in which
/// both elements are on record. Stations left without bounds are dropped.
/// Output order is the insertion order of `stations`.
pub fn parse_inventory(raw: &str, mut stations: StationMap) -> Vec<Station> {
    for line in raw.lines() {
        let Some(coverage) = parse_inventory_line(line) else {
            continue;
        };
        let Some(station) = stations.get_mut(coverage.station_id) else {
            continue;
        };

        station.min_year = Some(
            station
                .min_year
                .map_or(coverage.first_year, |y| y.max(coverage.first_year)),
        );
        station.max_year = Some(
            station
                .max_year
                .map_or(coverage.last_year, |y| y.min(coverage.last_year)),
        );
    }

    let total = stations.len();
    let covered: Vec<Station> = stations
        .into_vec()
        .into_iter()
        .filter(|s| s.year_bounds().is_some())
        .collect();

    debug!(
        total,
        covered = covered.len(),
        "merged temperature inventory"
    );
    covered
}
