use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Overpass API returned status {0}")]
    Api(u16),

    #[error("Feed I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid feed payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown state: {0}")]
    UnknownState(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Network(err.to_string())
    }
}
