//! Basket persistence: the whole basket is one JSON array under one key.

use std::sync::Arc;

use seamart_core::BasketItem;
use seamart_core::constants::BASKET_STORAGE_KEY;

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// Reads and writes the serialized basket. Every save rewrites the full
/// list; there is no incremental update.
#[derive(Clone)]
pub struct BasketRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for BasketRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasketRepository").field("key", &self.key).finish_non_exhaustive()
    }
}

impl BasketRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, BASKET_STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Stored entries, or an empty list when nothing was saved yet.
    pub async fn load(&self) -> Result<Vec<BasketItem>, StorageError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::corruption(format!("basket under key '{}'", self.key), e))
    }

    pub async fn save(&self, items: &[BasketItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.key, &raw).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key).await.map(|_| ())
    }
}
