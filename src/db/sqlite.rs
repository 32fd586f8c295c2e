use crate::db::models::{NearbyStation, Reading, Station, UserLocation};
use crate::db::schema::SQLITE_INIT;
use crate::error::DustwatchError;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Handle over the monitoring store.
///
/// Constructed once at startup and cloned into each component; there is no
/// global singleton. Every statement auto-commits; the nearby-cache
/// replacement is the only multi-statement write and runs in one transaction.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (creating if missing) the database and initializes the schema.
    pub async fn connect(database_url: &str) -> Result<Self, DustwatchError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    async fn init_schema(&self) -> Result<(), DustwatchError> {
        // execute statements one by one (sqlx::query rejects multi-commands)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // --- stations ---

    pub async fn stations(&self) -> Result<Vec<Station>, DustwatchError> {
        let rows = sqlx::query_as::<_, Station>(
            "SELECT name, address, latitude, longitude FROM stations ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn station(&self, name: &str) -> Result<Option<Station>, DustwatchError> {
        let row = sqlx::query_as::<_, Station>(
            "SELECT name, address, latitude, longitude FROM stations WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn station_count(&self) -> Result<i64, DustwatchError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts station reference data in one transaction, together with a
    /// blank reading row per station for the refresh job to overwrite.
    /// Returns the number of stations inserted.
    pub async fn insert_stations(&self, stations: &[Station]) -> Result<u64, DustwatchError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for station in stations {
            let result = sqlx::query(
                r#"
                INSERT INTO stations (name, address, latitude, longitude)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(name) DO NOTHING
                "#,
            )
            .bind(&station.name)
            .bind(&station.address)
            .bind(station.latitude)
            .bind(station.longitude)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();

            sqlx::query(
                r#"
                INSERT INTO readings (station_name, khai, measured_at, requested_at)
                VALUES (?, NULL, NULL, NULL)
                ON CONFLICT(station_name) DO NOTHING
                "#,
            )
            .bind(&station.name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    // --- readings ---

    pub async fn reading(&self, station_name: &str) -> Result<Option<Reading>, DustwatchError> {
        let row = sqlx::query_as::<_, Reading>(
            r#"SELECT station_name, khai, measured_at, requested_at
               FROM readings WHERE station_name = ?"#,
        )
        .bind(station_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrites the reading for a station in place. A station name unknown
    /// to the store affects zero rows and reports `false`; callers treat that
    /// as a no-op, not an error.
    pub async fn apply_reading(
        &self,
        station_name: &str,
        khai: Option<i64>,
        measured_at: Option<NaiveDateTime>,
        requested_at: DateTime<Utc>,
    ) -> Result<bool, DustwatchError> {
        let result = sqlx::query(
            r#"UPDATE readings SET khai = ?, measured_at = ?, requested_at = ?
               WHERE station_name = ?"#,
        )
        .bind(khai)
        .bind(measured_at)
        .bind(requested_at)
        .bind(station_name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- user locations ---

    pub async fn user_locations(&self) -> Result<Vec<UserLocation>, DustwatchError> {
        let rows = sqlx::query_as::<_, UserLocation>(
            "SELECT alias, latitude, longitude FROM user_locations ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn user_location(&self, alias: &str) -> Result<Option<UserLocation>, DustwatchError> {
        let row = sqlx::query_as::<_, UserLocation>(
            "SELECT alias, latitude, longitude FROM user_locations WHERE alias = ?",
        )
        .bind(alias)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Upsert by unique alias.
    pub async fn upsert_user_location(
        &self,
        location: &UserLocation,
    ) -> Result<(), DustwatchError> {
        sqlx::query(
            r#"
            INSERT INTO user_locations (alias, latitude, longitude)
            VALUES (?, ?, ?)
            ON CONFLICT(alias) DO UPDATE SET
                latitude=excluded.latitude,
                longitude=excluded.longitude
            "#,
        )
        .bind(&location.alias)
        .bind(location.latitude)
        .bind(location.longitude)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Deletes a saved location; its cached nearby stations go with it via
    /// the cascade. Reports whether a row existed.
    pub async fn delete_user_location(&self, alias: &str) -> Result<bool, DustwatchError> {
        let result = sqlx::query("DELETE FROM user_locations WHERE alias = ?")
            .bind(alias)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- nearby-station cache ---

    pub async fn nearby_cache(&self, alias: &str) -> Result<Vec<NearbyStation>, DustwatchError> {
        let rows = sqlx::query_as::<_, NearbyStation>(
            r#"SELECT alias, station_name, distance_km
               FROM nearby_stations WHERE alias = ?"#,
        )
        .bind(alias)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fully replaces the cached nearby-station list for one alias.
    /// Delete and inserts share a transaction so a crash can never leave a
    /// partially replaced cache.
    pub async fn replace_nearby_cache(
        &self,
        alias: &str,
        entries: &[(String, f64)],
    ) -> Result<(), DustwatchError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM nearby_stations WHERE alias = ?")
            .bind(alias)
            .execute(&mut *tx)
            .await?;

        for (station_name, distance_km) in entries {
            sqlx::query(
                r#"INSERT INTO nearby_stations (alias, station_name, distance_km)
                   VALUES (?, ?, ?)"#,
            )
            .bind(alias)
            .bind(station_name)
            .bind(distance_km)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
