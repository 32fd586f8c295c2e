//! Scheduled refresh of the readings table from the measurement provider.

use crate::api::air_korea::{AirKoreaClient, ReadingItem};
use crate::db::sqlite::Store;
use crate::error::DustwatchError;
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    /// Readings overwritten in place.
    pub updated: u64,
    /// Payload entries naming a station the store does not know. No-ops.
    pub unmatched: u64,
}

pub struct RefreshJob {
    store: Store,
    api: AirKoreaClient,
}

impl RefreshJob {
    pub fn new(store: Store, api: AirKoreaClient) -> Self {
        Self { store, api }
    }

    /// Fetches the bulk payload and overwrites one reading row per entry.
    pub async fn run(&self) -> Result<RefreshStats, DustwatchError> {
        let items = self.api.fetch_all().await?;
        self.apply(&items).await
    }

    /// Applies a bulk payload to the readings table. Split from the fetch so
    /// synthetic payloads can drive it directly.
    pub async fn apply(&self, items: &[ReadingItem]) -> Result<RefreshStats, DustwatchError> {
        let now = Utc::now();
        let mut stats = RefreshStats::default();

        for item in items {
            let khai = item.khai();
            let measured_at = item.measured_at();
            let matched = self
                .store
                .apply_reading(&item.station_name, khai, measured_at, now)
                .await?;
            if matched {
                stats.updated += 1;
            } else {
                debug!(station = %item.station_name, "payload entry matches no stored station");
                stats.unmatched += 1;
            }
        }

        info!(
            updated = stats.updated,
            unmatched = stats.unmatched,
            "readings refreshed"
        );
        Ok(stats)
    }
}
