//! Test utilities and module declarations for storage tests.

use std::sync::Arc;

use seamart_core::{BasketItem, FeedItem, LocalizedName};
use tempfile::TempDir;

use crate::SqliteStore;

pub fn create_test_store() -> (SqliteStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("test.db");
    let store = SqliteStore::open(&db_path).unwrap();
    (store, temp_dir)
}

pub fn create_test_entry(id: &str, quantity: u32) -> BasketItem {
    BasketItem::new(FeedItem::new(id, LocalizedName::single("en", format!("Catch {id}"))), quantity)
}

pub fn shared(store: SqliteStore) -> Arc<SqliteStore> {
    Arc::new(store)
}

mod kv_tests;
