//! REST client for the seamart backend
//!
//! Wraps the feed, search and item endpoints. Pagination state, filtering
//! and retries live in the service crate; this crate performs one request
//! per call and never retries on its own.

mod api_types;
mod client;
mod error;
mod source;

#[cfg(test)]
mod client_tests;

pub use api_types::PaginatedDocs;
pub use client::{DEFAULT_USER_AGENT, FeedClient};
pub use error::ApiError;
pub use source::{FeedSource, SearchSource};
