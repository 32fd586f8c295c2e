//! SQL DDL for initializing the monitoring store.

/// SQLite schema:
/// - `stations`: immutable reference data, keyed by station name
/// - `readings`: one row per station, overwritten in place; NULL `khai` /
///   `measured_at` mean "no valid data yet", there is no numeric sentinel
/// - `user_locations`: operator-saved coordinates, keyed by alias
/// - `nearby_stations`: cached (alias, station, distance) triples, fully
///   replaced whenever a location is saved
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS stations (
    name TEXT PRIMARY KEY,
    address TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS readings (
    station_name TEXT PRIMARY KEY REFERENCES stations(name) ON DELETE CASCADE,
    khai INTEGER NULL,
    measured_at TEXT NULL,
    requested_at TEXT NULL
);

CREATE TABLE IF NOT EXISTS user_locations (
    alias TEXT PRIMARY KEY,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS nearby_stations (
    alias TEXT NOT NULL REFERENCES user_locations(alias) ON DELETE CASCADE,
    station_name TEXT NOT NULL REFERENCES stations(name) ON DELETE CASCADE,
    distance_km REAL NOT NULL,
    PRIMARY KEY (alias, station_name)
);

CREATE INDEX IF NOT EXISTS idx_nearby_stations_alias ON nearby_stations(alias)
"#;
