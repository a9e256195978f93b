//! Station catalog: parsing, persistence and the yearly refresh.
//!
//! The catalog is rebuilt from NOAA's `ghcnd-stations.txt` and
//! `ghcnd-inventory.txt` at most once per calendar year and is read-only
//! in between.

mod error;
mod parse;
mod refresh;
mod store;
mod types;

pub use error::{RefreshError, StoreError};
pub use parse::{StationMap, parse_inventory, parse_stations};
pub use refresh::{CatalogRefresher, RefreshOutcome};
pub use store::{BlobStore, CatalogStore, DEFAULT_CATALOG_PATH, FileBlobStore, MemoryBlobStore};
pub use types::{Catalog, InvalidStationId, MAX_STATION_ID_LEN, Station, validate_station_id};
