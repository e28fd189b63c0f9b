use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use mihrab_common::Coordinate;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Geocoder returned status {0}")]
    Api(u16),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Network(err.to_string())
    }
}

/// Best-effort reverse geocoder against a Nominatim instance. Used only for
/// human-readable place naming, never for computation; callers degrade to a
/// generic label when it fails.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: ReverseAddress,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    state: Option<String>,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        // Nominatim's usage policy requires an identifying user agent.
        // The timeout is short on purpose: name resolution must not stall
        // a location request that is already usable.
        let client = reqwest::Client::builder()
            .user_agent("mihrab/0.1 (masjid directory)")
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a coordinate to the most specific settlement name available:
    /// city, then town, village, county, state. `None` when the response
    /// carries no usable component.
    pub async fn reverse(&self, coord: Coordinate) -> Result<Option<String>, GeocodeError> {
        let endpoint = format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}",
            self.base_url, coord.lat, coord.lon
        );

        let resp = self.client.get(&endpoint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Api(status.as_u16()));
        }

        let body: ReverseResponse = resp.json().await?;
        let ReverseAddress {
            city,
            town,
            village,
            county,
            state,
        } = body.address;

        Ok(city.or(town).or(village).or(county).or(state))
    }
}
