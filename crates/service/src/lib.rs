//! Service layer for seamart
//!
//! The feed workflow (filters, pagination, search overlay, display
//! reconciliation) and the persisted basket, on top of the api and storage
//! crates.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]

mod basket_service;
mod error;
mod feed;
mod notice;

pub use basket_service::BasketService;
pub use error::ServiceError;
pub use feed::{FeedController, FeedRequest, FeedState, FeedView, LoadKind, LoadOutcome, SearchTicket};
pub use notice::{ErrorNotice, RetryAction};
