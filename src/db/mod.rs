//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: the `Store` handle wrapping the connection pool
//! - `seed.rs`: station reference-data import from a JSON file

pub mod models;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use models::{NearbyStation, Reading, Station, UserLocation};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Store};
