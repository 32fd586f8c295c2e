use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DustwatchError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The geocoding provider answered with a status other than `OK` or
    /// `ZERO_RESULTS` (quota exhausted, bad key, malformed request).
    #[error("Geocoding request rejected with status {0}")]
    GeocodeStatus(String),

    /// The station table is empty, so no nearest-station result exists.
    #[error("No monitoring station available")]
    NoStationAvailable,
}
