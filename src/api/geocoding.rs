//! Client for the Google Geocoding API (address → coordinates and back).

use crate::config::Config;
use crate::error::DustwatchError;
use serde::Deserialize;
use url::Url;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// An empty result list means "address not found" and is not an error; the
/// console re-prompts. Any status other than `OK` / `ZERO_RESULTS` is.
fn into_results(response: GeocodeResponse) -> Result<Vec<GeocodeResult>, DustwatchError> {
    match response.status.as_str() {
        "OK" => Ok(response.results),
        "ZERO_RESULTS" => Ok(Vec::new()),
        other => Err(DustwatchError::GeocodeStatus(other.to_string())),
    }
}

pub struct GeocodingClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl GeocodingClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Result<Self, DustwatchError> {
        Ok(Self {
            client,
            endpoint: Url::parse(GEOCODE_URL)?,
            api_key: config.google_maps_api_key.clone(),
        })
    }

    /// Forward geocoding: free-form address → candidate coordinates.
    pub async fn forward(&self, address: &str) -> Result<Vec<GeocodeResult>, DustwatchError> {
        self.query(&[("address", address)]).await
    }

    /// Reverse geocoding: coordinates → formatted addresses.
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<Vec<GeocodeResult>, DustwatchError> {
        self.query(&[("latlng", &format!("{lat},{lng}"))]).await
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Vec<GeocodeResult>, DustwatchError> {
        let response: GeocodeResponse = self
            .client
            .get(self.endpoint.clone())
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        into_results(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_BODY: &str = r#"{
        "status": "OK",
        "results": [
            {
                "formatted_address": "Seoul, South Korea",
                "geometry": {"location": {"lat": 37.5665, "lng": 126.978}}
            }
        ]
    }"#;

    #[test]
    fn ok_status_yields_results() {
        let response: GeocodeResponse = serde_json::from_str(OK_BODY).unwrap();
        let results = into_results(response).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].formatted_address, "Seoul, South Korea");
        assert!((results[0].geometry.location.lat - 37.5665).abs() < 1e-9);
    }

    #[test]
    fn zero_results_is_empty_not_error() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();
        assert!(into_results(response).unwrap().is_empty());
    }

    #[test]
    fn other_status_is_an_error() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"status": "REQUEST_DENIED", "results": []}"#).unwrap();
        match into_results(response) {
            Err(DustwatchError::GeocodeStatus(status)) => assert_eq!(status, "REQUEST_DENIED"),
            other => panic!("expected GeocodeStatus error, got {other:?}"),
        }
    }
}
