//! Client for the Air Korea nationwide real-time measurement API.
//!
//! One GET returns a bulk payload with one entry per station. Field values
//! arrive as strings and are frequently absent or garbage (`"-"`); parse
//! helpers return `Option` so callers can tell "no data" from a valid value.

use crate::config::Config;
use crate::error::DustwatchError;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;
use url::Url;

const AIR_KOREA_URL: &str =
    "http://apis.data.go.kr/B552584/ArpltnInforInqireSvc/getCtprvnRltmMesureDnsty";

const DATA_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Response,
}

#[derive(Debug, Deserialize)]
struct Response {
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(default)]
    items: Vec<ReadingItem>,
}

/// One station's entry in the bulk payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingItem {
    #[serde(rename = "stationName")]
    pub station_name: String,
    #[serde(rename = "khaiValue", default)]
    pub khai_value: Option<String>,
    #[serde(rename = "dataTime", default)]
    pub data_time: Option<String>,
}

impl ReadingItem {
    /// Integrated index as an integer; absent or unparseable → `None`.
    pub fn khai(&self) -> Option<i64> {
        self.khai_value.as_deref()?.trim().parse().ok()
    }

    /// Measurement time (`YYYY-MM-DD HH:MM`); absent or unparseable → `None`.
    pub fn measured_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.data_time.as_deref()?.trim(), DATA_TIME_FORMAT).ok()
    }
}

pub struct AirKoreaClient {
    client: reqwest::Client,
    endpoint: Url,
    service_key: String,
    rows: u32,
}

impl AirKoreaClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Result<Self, DustwatchError> {
        Ok(Self {
            client,
            endpoint: Url::parse(AIR_KOREA_URL)?,
            service_key: config.air_korea_api_key.clone(),
            rows: config.fetch_rows,
        })
    }

    /// Fetches the nationwide bulk payload, retrying transient server errors
    /// with exponential backoff.
    pub async fn fetch_all(&self) -> Result<Vec<ReadingItem>, DustwatchError> {
        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5))
            .with_max_times(3)
            .with_jitter();

        let resp = (|| async {
            let resp = self
                .client
                .get(self.endpoint.clone())
                .query(&[
                    ("serviceKey", self.service_key.as_str()),
                    ("returnType", "json"),
                    ("numOfRows", &self.rows.to_string()),
                    ("pageNo", "1"),
                    ("sidoName", "전국"),
                    ("ver", "1.0"),
                ])
                .send()
                .await?;
            if resp.status().is_server_error() {
                let status = resp.status();
                let err = resp.error_for_status().unwrap_err();
                warn!("Air Korea server error (will retry): {}", status);
                return Err(err);
            }
            Ok(resp)
        })
        .retry(retry_policy)
        .await?;

        let envelope: Envelope = resp.error_for_status()?.json().await?;
        Ok(envelope.response.body.items)
    }
}
