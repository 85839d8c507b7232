use std::sync::Arc;

use seamart_core::{Basket, BasketItem, FeedItem};
use seamart_storage::{BasketRepository, KeyValueStore};
use tokio::sync::RwLock;

use crate::error::ServiceError;
use crate::notice::{ErrorNotice, RetryAction};

/// In-memory basket mirrored to on-device storage.
///
/// Every mutation is followed by a full rewrite of the stored list. The
/// write lock is held across the save so stored snapshots land in
/// mutation order. A failed save leaves a notice offering
/// [`RetryAction::PersistBasket`] until a later save succeeds.
pub struct BasketService {
    repo: BasketRepository,
    basket: RwLock<Basket>,
    notice: RwLock<Option<ErrorNotice>>,
}

impl BasketService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_repository(BasketRepository::new(store))
    }

    #[must_use]
    pub fn with_repository(repo: BasketRepository) -> Self {
        Self { repo, basket: RwLock::new(Basket::new()), notice: RwLock::new(None) }
    }

    /// Reloads the basket from storage (screen focus). Best-effort: any
    /// read or decode failure leaves the basket empty. Returns the number
    /// of entries loaded.
    pub async fn load(&self) -> usize {
        let loaded = match self.repo.load().await {
            Ok(items) => Basket::from_items(items),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored basket, starting empty");
                Basket::new()
            },
        };
        let count = loaded.len();
        *self.basket.write().await = loaded;
        tracing::debug!(entries = count, "Basket loaded");
        count
    }

    /// Adds `quantity` of `item`, merging with an existing entry of the same
    /// id. Returns the entry's new quantity.
    pub async fn add(&self, item: FeedItem, quantity: u32) -> Result<u32, ServiceError> {
        let mut basket = self.basket.write().await;
        let id = item.id.clone();
        let total = basket.add(item, quantity)?;
        tracing::info!(item = %id, added = quantity, total, "Added to basket");
        self.save(&basket).await?;
        Ok(total)
    }

    pub async fn set_quantity(&self, id: &str, quantity: u32) -> Result<(), ServiceError> {
        let mut basket = self.basket.write().await;
        basket.set_quantity(id, quantity)?;
        self.save(&basket).await
    }

    /// Returns `true` if an entry was removed. Nothing is written otherwise.
    pub async fn remove(&self, id: &str) -> Result<bool, ServiceError> {
        let mut basket = self.basket.write().await;
        if !basket.remove(id) {
            return Ok(false);
        }
        self.save(&basket).await?;
        Ok(true)
    }

    /// Empties the basket and drops the stored key.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        let mut basket = self.basket.write().await;
        basket.clear();
        let result = self.repo.clear().await.map_err(ServiceError::Storage);
        self.settle(result, 0).await
    }

    /// Writes the current basket again, e.g. after a failed save.
    pub async fn persist(&self) -> Result<(), ServiceError> {
        let basket = self.basket.write().await;
        self.save(&basket).await
    }

    /// Repeats the save offered by the current notice. Returns `false` when
    /// there was nothing to retry.
    pub async fn retry(&self) -> Result<bool, ServiceError> {
        let pending = self.notice.read().await.as_ref().and_then(|n| n.retry.clone());
        if pending != Some(RetryAction::PersistBasket) {
            return Ok(false);
        }
        self.persist().await?;
        Ok(true)
    }

    pub async fn notice(&self) -> Option<ErrorNotice> {
        self.notice.read().await.clone()
    }

    pub async fn items(&self) -> Vec<BasketItem> {
        self.basket.read().await.items().to_vec()
    }

    pub async fn total_quantity(&self) -> u64 {
        self.basket.read().await.total_quantity()
    }

    async fn save(&self, basket: &Basket) -> Result<(), ServiceError> {
        let result = self.repo.save(basket.items()).await.map_err(ServiceError::Storage);
        self.settle(result, basket.len()).await
    }

    async fn settle(
        &self,
        result: Result<(), ServiceError>,
        entries: usize,
    ) -> Result<(), ServiceError> {
        let mut notice = self.notice.write().await;
        match result {
            Ok(()) => {
                *notice = None;
                Ok(())
            },
            Err(e) => {
                tracing::warn!(error = %e, entries, "Failed to persist basket");
                *notice = Some(ErrorNotice::classify(&e, RetryAction::PersistBasket));
                Err(e)
            },
        }
    }
}
