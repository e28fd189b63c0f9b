use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
/// Everything has a sensible default; nothing here is required at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the on-disk data directory (state files, favorites, cached
    /// location all live beneath it).
    pub data_dir: PathBuf,

    /// Overpass API endpoint for the masjid feed.
    pub overpass_url: String,

    /// Nominatim endpoint for best-effort reverse geocoding.
    pub nominatim_url: String,

    /// IP-geolocation endpoint used by the default location provider.
    pub ip_api_url: String,

    /// Default search radius for nearby queries, in miles.
    pub default_radius_miles: f64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("MIHRAB_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            overpass_url: env::var("MIHRAB_OVERPASS_URL")
                .unwrap_or_else(|_| "https://overpass-api.de/api/interpreter".to_string()),
            nominatim_url: env::var("MIHRAB_NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            ip_api_url: env::var("MIHRAB_IP_API_URL")
                .unwrap_or_else(|_| "http://ip-api.com".to_string()),
            default_radius_miles: env::var("MIHRAB_DEFAULT_RADIUS_MILES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10.0),
        }
    }

    /// Directory holding the per-state masjid JSON files.
    pub fn states_dir(&self) -> PathBuf {
        self.data_dir.join("masajid").join("states")
    }

    /// Path of the master feed index.
    pub fn index_file(&self) -> PathBuf {
        self.data_dir.join("masajid").join("_index.json")
    }

    /// Directory backing the key-value store (favorites, cached location).
    pub fn kv_dir(&self) -> PathBuf {
        self.data_dir.join("kv")
    }
}
