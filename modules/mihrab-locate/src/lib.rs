pub mod cache;
pub mod error;
pub mod geocode;
pub mod provider;

pub use cache::{CachedLocation, LocationCache, USER_LOCATION_KEY};
pub use error::LocationError;
pub use geocode::{GeocodeError, NominatimClient};
pub use provider::{IpApiProvider, LocationProvider};
