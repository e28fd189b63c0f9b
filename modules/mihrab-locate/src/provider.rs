use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use mihrab_common::Coordinate;

use crate::error::LocationError;

/// Port for the platform's location-acquisition capability.
///
/// Implementations resolve the device's current position once per call;
/// the cache layer owns timeouts, coalescing, and persistence.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// IP-geolocation provider backed by the ip-api.com JSON endpoint.
/// Coarse (city-level) but requires no device hardware, so it serves as the
/// default capability on headless hosts.
pub struct IpApiProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

impl IpApiProvider {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpApiProvider {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        let endpoint = format!("{}/json", self.base_url);

        let resp = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "geolocation endpoint returned status {status}"
            )));
        }

        let body: IpApiResponse = resp
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if body.status != "success" {
            return Err(LocationError::Unavailable(body.message));
        }

        let coord = Coordinate::new(body.lat, body.lon);
        if !coord.is_valid() {
            return Err(LocationError::Unavailable(format!(
                "provider returned out-of-range coordinates {}, {}",
                body.lat, body.lon
            )));
        }

        Ok(coord)
    }
}
