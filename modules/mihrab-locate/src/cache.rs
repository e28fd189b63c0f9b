use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

use mihrab_common::Coordinate;
use mihrab_store::KvStore;

use crate::error::LocationError;
use crate::geocode::NominatimClient;
use crate::provider::LocationProvider;

/// Logical key the cached location persists under.
pub const USER_LOCATION_KEY: &str = "userLocation";

/// A cached location older than this is treated as absent.
const FRESHNESS_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Bounded wait for the platform location capability.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// The user's last known position. `city` is the best-effort reverse-geocoded
/// place name; `None` means the caller renders a generic label. `timestamp`
/// is epoch milliseconds at capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub timestamp: i64,
}

impl CachedLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp < FRESHNESS_WINDOW_MS
    }
}

/// Process-wide, time-bounded cache of the user's position.
///
/// All reads and writes go through this API; consumers never touch the
/// backing store directly. A successful refresh fully replaces the prior
/// value — no merged state is ever observable.
pub struct LocationCache {
    kv: KvStore,
    provider: Arc<dyn LocationProvider>,
    geocoder: Option<NominatimClient>,
    current: ArcSwapOption<CachedLocation>,
    /// Serializes platform requests so overlapping callers share one
    /// in-flight acquisition instead of racing to overwrite each other.
    request_lock: Mutex<()>,
    generation: AtomicU64,
}

impl LocationCache {
    /// Build a cache over the given store and provider, warming the
    /// in-memory value from any persisted location.
    pub fn new(kv: KvStore, provider: Arc<dyn LocationProvider>) -> Self {
        let persisted: Option<CachedLocation> = kv.get(USER_LOCATION_KEY);
        Self {
            kv,
            provider,
            geocoder: None,
            current: ArcSwapOption::from(persisted.map(Arc::new)),
            request_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Attach a reverse geocoder for place naming. Optional: without one,
    /// cached locations simply carry no city.
    pub fn with_geocoder(mut self, geocoder: NominatimClient) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// The cached location, only when present and younger than the
    /// 24-hour freshness window.
    pub fn get(&self) -> Option<CachedLocation> {
        let now_ms = Utc::now().timestamp_millis();
        self.current
            .load_full()
            .filter(|loc| loc.is_fresh(now_ms))
            .map(|loc| (*loc).clone())
    }

    /// Acquire a fresh position from the platform capability, bounded by a
    /// 10-second timeout, and store it as the new cached location.
    ///
    /// A caller that arrives while another request is in flight waits for
    /// that outcome and reuses it rather than issuing a duplicate platform
    /// call.
    pub async fn request(&self) -> Result<CachedLocation, LocationError> {
        let observed_gen = self.generation.load(Ordering::SeqCst);
        let _guard = self.request_lock.lock().await;

        // Someone else completed a request while we waited for the lock
        if self.generation.load(Ordering::SeqCst) != observed_gen {
            if let Some(loc) = self.get() {
                return Ok(loc);
            }
        }

        let coord = timeout(ACQUIRE_TIMEOUT, self.provider.current_position())
            .await
            .map_err(|_| LocationError::Timeout)??;

        let city = self.resolve_city(coord).await;

        let location = CachedLocation {
            lat: coord.lat,
            lon: coord.lon,
            city,
            timestamp: Utc::now().timestamp_millis(),
        };

        self.current.store(Some(Arc::new(location.clone())));
        self.generation.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.kv.put(USER_LOCATION_KEY, &location) {
            warn!(error = %e, "Failed to persist location, keeping in-memory value");
        }

        info!(
            lat = location.lat,
            lon = location.lon,
            city = location.city.as_deref().unwrap_or("-"),
            "Location refreshed"
        );
        Ok(location)
    }

    /// The cached location when fresh, otherwise a full `request()`.
    pub async fn get_or_request(&self) -> Result<CachedLocation, LocationError> {
        match self.get() {
            Some(loc) => Ok(loc),
            None => self.request().await,
        }
    }

    /// Best-effort place naming. Any failure degrades to `None`; it never
    /// bubbles into the location result.
    async fn resolve_city(&self, coord: Coordinate) -> Option<String> {
        let geocoder = self.geocoder.as_ref()?;
        match geocoder.reverse(coord).await {
            Ok(city) => city,
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed, falling back to generic label");
                None
            }
        }
    }
}
