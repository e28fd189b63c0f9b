use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use mihrab_common::{Coordinate, Masjid, MasjidAddress};

use crate::kv::KvStore;

/// Logical key the favorites set persists under.
pub const FAVORITES_KEY: &str = "favoriteMasajid";

/// A saved directory entry. `added_at` is epoch milliseconds at the moment
/// the user favorited it; the set is keyed by `id` with at most one record
/// per masjid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMasjid {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: MasjidAddress,
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    pub added_at: i64,
}

impl FavoriteMasjid {
    fn from_masjid(masjid: &Masjid) -> Self {
        Self {
            id: masjid.id.clone(),
            name: masjid.name.clone(),
            address: masjid.address.clone(),
            coordinates: masjid.coordinates,
            phone: masjid.phone.clone(),
            website: masjid.website.clone(),
            added_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Deduplicated, persisted favorites set.
///
/// Every call is a synchronous read-modify-write against the KV store.
/// Persistence failures are absorbed: a corrupted payload reads as an empty
/// set, and a failed write logs a warning without propagating.
pub struct FavoritesStore {
    kv: KvStore,
}

impl FavoritesStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    fn load(&self) -> Vec<FavoriteMasjid> {
        self.kv.get(FAVORITES_KEY).unwrap_or_default()
    }

    fn save(&self, favorites: &[FavoriteMasjid]) {
        if let Err(e) = self.kv.put(FAVORITES_KEY, favorites) {
            warn!(error = %e, "Failed to persist favorites");
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.load().iter().any(|f| f.id == id)
    }

    /// Insert a favorite record for `masjid`. Idempotent: a second add with
    /// the same id leaves the existing record (and its timestamp) untouched.
    pub fn add(&self, masjid: &Masjid) {
        let mut favorites = self.load();
        if favorites.iter().any(|f| f.id == masjid.id) {
            return;
        }
        favorites.push(FavoriteMasjid::from_masjid(masjid));
        self.save(&favorites);
    }

    /// Remove the record with this id, if present. No-op otherwise.
    pub fn remove(&self, id: &str) {
        let mut favorites = self.load();
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() != before {
            self.save(&favorites);
        }
    }

    /// Flip membership for `masjid` and return the resulting state:
    /// true when it is now a favorite.
    pub fn toggle(&self, masjid: &Masjid) -> bool {
        if self.is_favorite(&masjid.id) {
            self.remove(&masjid.id);
            false
        } else {
            self.add(masjid);
            true
        }
    }

    /// All favorites, most recently added first.
    pub fn list(&self) -> Vec<FavoriteMasjid> {
        let mut favorites = self.load();
        favorites.sort_by_key(|f| std::cmp::Reverse(f.added_at));
        favorites
    }
}
