use thiserror::Error;

/// Failure modes of location acquisition. These propagate to the calling
/// surface, which owns user-visible messaging and any retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location request timed out")]
    Timeout,

    #[error("No geolocation capability is available")]
    Unsupported,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}
