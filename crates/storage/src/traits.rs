//! Storage backend trait abstraction

use async_trait::async_trait;

use crate::error::StorageError;

/// String key-value storage, the on-device persistence primitive.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store or replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Returns `true` if a value was removed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
