//! Runtime configuration.
//!
//! Built once at startup from defaults merged with `DUSTWATCH_`-prefixed
//! environment variables (a `.env` file is honored by the caller via
//! `dotenvy`). The resulting struct is passed down to every component; no
//! module reads configuration on its own.

use crate::error::DustwatchError;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite connection string, e.g. `sqlite:dustwatch.sqlite3`.
    pub database_url: String,

    /// Service key for the Air Korea real-time measurement API.
    pub air_korea_api_key: String,

    /// API key for the Google Geocoding API.
    pub google_maps_api_key: String,

    /// Seconds between scheduled refresh + alert cycles.
    pub refresh_interval_secs: u64,

    /// Radius used when matching stations around a coordinate, in km.
    pub nearby_radius_km: f64,

    /// Page size requested from the measurement API (one entry per station).
    pub fetch_rows: u32,

    /// Optional JSON file of station reference data, imported into an empty
    /// station table at startup.
    pub stations_file: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is not set.
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:dustwatch.sqlite3".to_string(),
            air_korea_api_key: String::new(),
            google_maps_api_key: String::new(),
            refresh_interval_secs: 3600,
            nearby_radius_km: 60.0,
            fetch_rows: 1000,
            stations_file: Some(PathBuf::from("stations.json")),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, DustwatchError> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("DUSTWATCH_"))
            .extract()?;
        Ok(config)
    }
}
