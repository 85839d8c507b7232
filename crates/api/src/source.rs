//! Seams between the loaders in the service crate and the network.

use async_trait::async_trait;
use seamart_core::{FeedItem, FeedQuery};

use crate::client::FeedClient;
use crate::error::ApiError;

/// One page of the feed per call.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<FeedItem>, ApiError>;
}

/// First page of search results for a free-text query.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, text: &str, page_size: u32) -> Result<Vec<FeedItem>, ApiError>;
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<FeedItem>, ApiError> {
        self.feed_page(query).await
    }
}

#[async_trait]
impl SearchSource for FeedClient {
    async fn search(&self, text: &str, page_size: u32) -> Result<Vec<FeedItem>, ApiError> {
        self.search_items(text, page_size).await
    }
}
