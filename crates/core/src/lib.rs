//! Core types for seamart
//!
//! Domain types shared by the storage, api and service crates.

mod basket;
pub mod config;
pub mod constants;
mod cursor;
mod error;
mod feed_item;
mod filter;

pub use basket::{Basket, BasketItem};
pub use config::ClientConfig;
pub use cursor::{FeedQuery, PageCursor};
pub use error::*;
pub use feed_item::{ContentType, EntityRef, FeedItem, LocalizedName, Unit};
pub use filter::FilterSet;
