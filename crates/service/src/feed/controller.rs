use std::sync::Arc;

use seamart_api::{FeedSource, SearchSource};
use seamart_core::{ContentType, FeedItem, FilterSet};
use tokio::sync::RwLock;

use super::state::{FeedRequest, FeedState, FeedView, LoadOutcome};
use crate::error::ServiceError;
use crate::notice::RetryAction;

/// Drives [`FeedState`] against the network.
///
/// The state lock is never held across a fetch, so overlapping calls race
/// for real; the generation check in [`FeedState::complete`] decides which
/// response is applied.
pub struct FeedController {
    feed: Arc<dyn FeedSource>,
    search: Option<Arc<dyn SearchSource>>,
    state: RwLock<FeedState>,
}

impl FeedController {
    #[must_use]
    pub fn new(feed: Arc<dyn FeedSource>, page_size: u32) -> Self {
        Self { feed, search: None, state: RwLock::new(FeedState::new(page_size)) }
    }

    #[must_use]
    pub fn with_search(mut self, search: Arc<dyn SearchSource>) -> Self {
        self.search = Some(search);
        self
    }

    /// Screen focus / pull-to-refresh: reload page 1.
    pub async fn refresh(&self) -> Result<LoadOutcome, ServiceError> {
        let request = self.state.write().await.begin_refresh();
        self.run(request).await
    }

    pub async fn toggle_filter(&self, key: ContentType) -> Result<LoadOutcome, ServiceError> {
        let request = self.state.write().await.toggle_filter(key);
        self.run(request).await
    }

    pub async fn set_filters(&self, filters: FilterSet) -> Result<LoadOutcome, ServiceError> {
        let request = self.state.write().await.set_filters(filters);
        self.run(request).await
    }

    /// Scroll-to-end. Skipped when there is nothing more to load.
    pub async fn load_more(&self) -> Result<LoadOutcome, ServiceError> {
        let Some(request) = self.state.write().await.begin_load_more() else {
            return Ok(LoadOutcome::Skipped);
        };
        self.run(request).await
    }

    /// Fetches search results and shows them in the overlay. A blank query
    /// clears the overlay instead.
    pub async fn search(&self, query: &str) -> Result<LoadOutcome, ServiceError> {
        if query.trim().is_empty() {
            self.clear_search().await;
            return Ok(LoadOutcome::Applied);
        }
        let Some(source) = self.search.as_ref() else {
            return Err(ServiceError::NotConfigured("Search".to_owned()));
        };
        let (ticket, page_size) = {
            let mut state = self.state.write().await;
            (state.begin_search(query), state.cursor().page_size)
        };
        let result = source.search(&ticket.query, page_size).await;
        Ok(self.state.write().await.complete_search(&ticket, result)?)
    }

    /// External search callback: show already fetched results.
    pub async fn show_search_results(&self, query: &str, results: Vec<FeedItem>) {
        self.state.write().await.show_search_results(query, results);
    }

    pub async fn clear_search(&self) {
        self.state.write().await.clear_search();
    }

    /// Repeats the action offered by the current notice, if any.
    pub async fn retry(&self) -> Result<LoadOutcome, ServiceError> {
        let action = self.state.read().await.notice().and_then(|n| n.retry.clone());
        match action {
            Some(RetryAction::Refresh) => self.refresh().await,
            Some(RetryAction::LoadMore) => self.load_more().await,
            Some(RetryAction::Search { query }) => self.search(&query).await,
            Some(RetryAction::PersistBasket) | None => Ok(LoadOutcome::Skipped),
        }
    }

    pub async fn view(&self) -> FeedView {
        self.state.read().await.view()
    }

    pub async fn displayed(&self) -> Vec<FeedItem> {
        self.state.read().await.displayed().to_vec()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.cursor().has_more
    }

    async fn run(&self, request: FeedRequest) -> Result<LoadOutcome, ServiceError> {
        let result = self.feed.fetch_feed(&request.query).await;
        Ok(self.state.write().await.complete(&request, result)?)
    }
}
