//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::DEFAULT_CATALOG_PATH;
use crate::noaa::{DEFAULT_BASE_URL, NoaaClientConfig};

pub const BIND_ADDR_VAR: &str = "GHCN_BIND_ADDR";
pub const CATALOG_PATH_VAR: &str = "GHCN_CATALOG_PATH";
pub const BASE_URL_VAR: &str = "GHCN_BASE_URL";
pub const TIMEOUT_SECS_VAR: &str = "GHCN_TIMEOUT_SECS";
pub const REFRESH_CHECK_SECS_VAR: &str = "GHCN_REFRESH_CHECK_SECS";

/// A configuration variable with a value that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {name}: {reason}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    reason: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Where the station catalog is persisted.
    pub catalog_path: PathBuf,

    /// Root of the GHCN-Daily tree.
    pub base_url: String,

    /// Per-request timeout for feed downloads (seconds).
    pub timeout_secs: u64,

    /// How often the background task checks whether the catalog is stale
    /// (seconds). The catalog itself is only rebuilt once a year.
    pub refresh_check_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
            refresh_check_secs: 24 * 60 * 60,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(v) => parse_var(BIND_ADDR_VAR, v)?,
            None => defaults.bind_addr,
        };
        let catalog_path = lookup(CATALOG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);
        let base_url = lookup(BASE_URL_VAR).unwrap_or(defaults.base_url);
        let timeout_secs = match lookup(TIMEOUT_SECS_VAR) {
            Some(v) => parse_positive(TIMEOUT_SECS_VAR, v)?,
            None => defaults.timeout_secs,
        };
        let refresh_check_secs = match lookup(REFRESH_CHECK_SECS_VAR) {
            Some(v) => parse_positive(REFRESH_CHECK_SECS_VAR, v)?,
            None => defaults.refresh_check_secs,
        };

        Ok(Self {
            bind_addr,
            catalog_path,
            base_url,
            timeout_secs,
            refresh_check_secs,
        })
    }

    pub fn refresh_check_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_check_secs)
    }

    /// Feed client settings derived from this configuration.
    pub fn client_config(&self) -> NoaaClientConfig {
        NoaaClientConfig::default()
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout_secs)
    }
}

fn parse_var<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        name,
        reason: e.to_string(),
        value,
    })
}

fn parse_positive(name: &'static str, value: String) -> Result<u64, ConfigError> {
    let parsed: u64 = parse_var(name, value.clone())?;
    if parsed == 0 {
        return Err(ConfigError {
            name,
            value,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}
