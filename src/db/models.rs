use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A fixed government air-quality sensor location. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Station {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Latest pollution measurement for a station, overwritten in place on every
/// refresh cycle.
///
/// `khai` is the integrated air-quality index; `None` means the provider sent
/// nothing parseable for this station (distinct from any valid value).
/// `measured_at` is the provider's measurement time, `requested_at` the time
/// of our last update attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Reading {
    pub station_name: String,
    pub khai: Option<i64>,
    pub measured_at: Option<NaiveDateTime>,
    pub requested_at: Option<DateTime<Utc>>,
}

/// A named coordinate saved by the operator for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct UserLocation {
    pub alias: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Cached association between a saved location and a station within the
/// configured radius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct NearbyStation {
    pub alias: String,
    pub station_name: String,
    pub distance_km: f64,
}
