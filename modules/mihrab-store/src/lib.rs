pub mod favorites;
pub mod kv;

pub use favorites::{FavoriteMasjid, FavoritesStore};
pub use kv::{KvStore, StoreError};
