//! Storage layer for seamart
//!
//! On-device key-value persistence (SQLite-backed, with an in-memory
//! variant) and the basket repository built on top of it.

mod basket;
mod error;
mod memory;
mod migrations;
mod sqlite;
#[cfg(test)]
mod tests;
pub mod traits;

pub use basket::BasketRepository;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
