use crate::db::models::Station;
use crate::db::sqlite::Store;
use crate::error::DustwatchError;
use std::{fs, path::Path};
use tracing::{info, warn};

/// Load station reference data from a JSON file (an array of stations).
pub fn load_from_file(path: &Path) -> Result<Vec<Station>, DustwatchError> {
    if !path.exists() {
        info!(path = %path.display(), "stations file not found; skipping import");
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)?;
    let stations: Vec<Station> = serde_json::from_str(&contents)?;
    Ok(stations)
}

/// Imports the stations file into an empty station table. A populated table
/// is left untouched; station data is immutable reference data.
pub async fn seed_if_empty(store: &Store, path: &Path) -> Result<(), DustwatchError> {
    if store.station_count().await? > 0 {
        return Ok(());
    }

    match load_from_file(path) {
        Ok(stations) if !stations.is_empty() => {
            let inserted = store.insert_stations(&stations).await?;
            info!(path = %path.display(), count = inserted, "station table seeded");
        }
        Ok(_) => {
            warn!(path = %path.display(), "no stations imported; nearest-station queries will fail until the table is populated");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load stations file");
        }
    }
    Ok(())
}
