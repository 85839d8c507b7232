//! The locally accumulated basket.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::feed_item::FeedItem;

/// A feed item the user intends to buy, with how many of it.
///
/// Serialized flat: the item's own fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    #[serde(flatten)]
    pub item: FeedItem,
    pub quantity: u32,
}

impl BasketItem {
    #[must_use]
    pub fn new(item: FeedItem, quantity: u32) -> Self {
        Self { item, quantity }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.item.id
    }
}

/// Ordered basket entries, at most one per item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a basket from stored entries. Entries sharing an id are
    /// merged into the first one and zero quantities are dropped.
    #[must_use]
    pub fn from_items(items: Vec<BasketItem>) -> Self {
        let mut basket = Self::new();
        for entry in items {
            if entry.quantity == 0 {
                continue;
            }
            if let Some(existing) = basket.find_mut(entry.id()) {
                existing.quantity = existing.quantity.saturating_add(entry.quantity);
            } else {
                basket.items.push(entry);
            }
        }
        basket
    }

    /// Adds `quantity` of `item`. An existing entry with the same id has its
    /// quantity increased; otherwise a new entry is appended.
    ///
    /// Returns the entry's quantity after the addition.
    pub fn add(&mut self, item: FeedItem, quantity: u32) -> Result<u32> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        if let Some(existing) = self.find_mut(&item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return Ok(existing.quantity);
        }
        self.items.push(BasketItem::new(item, quantity));
        Ok(quantity)
    }

    /// Sets an entry's quantity outright; zero removes it.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return if self.remove(id) { Ok(()) } else { Err(CoreError::NotFound(id.to_owned())) };
        }
        let entry = self.find_mut(id).ok_or_else(|| CoreError::NotFound(id.to_owned()))?;
        entry.quantity = quantity;
        Ok(())
    }

    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|entry| entry.id() != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BasketItem> {
        self.items.iter().find(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all entry quantities (the badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|entry| u64::from(entry.quantity)).sum()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut BasketItem> {
        self.items.iter_mut().find(|entry| entry.id() == id)
    }
}
