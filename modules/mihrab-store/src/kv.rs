use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value store: one pretty-printed JSON file per logical key
/// under a data directory. This is the device-scoped persistence behind
/// favorites and the cached location.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// A missing file is `None`. A corrupted payload is also `None` —
    /// recovery from bad state is empty state, never a propagated parse
    /// failure.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored value, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value is corrupted, treating as absent");
                None
            }
        }
    }

    /// Serialize and write `value` under `key`, replacing any prior value.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(key), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
        label: String,
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();

        let value = Sample { n: 7, label: "seven".into() };
        kv.put("sample", &value).unwrap();
        assert_eq!(kv.get::<Sample>("sample"), Some(value));
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        assert_eq!(kv.get::<Sample>("nothing"), None);
    }

    #[test]
    fn corrupted_payload_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        assert_eq!(kv.get::<Sample>("bad"), None);
    }

    #[test]
    fn put_replaces_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        kv.put("k", &Sample { n: 1, label: "a".into() }).unwrap();
        kv.put("k", &Sample { n: 2, label: "b".into() }).unwrap();
        assert_eq!(kv.get::<Sample>("k").unwrap().n, 2);
    }
}
