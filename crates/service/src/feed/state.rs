//! Feed screen state: filters, cursor, accumulated pages and the search
//! overlay, plus the rule deciding what is displayed.
//!
//! Loads are split into `begin_*` (state change, returns what to fetch)
//! and `complete*` (apply the response). Each reload bumps `generation`;
//! a response whose generation is no longer current is dropped, so the
//! last user intent wins regardless of response order.

use seamart_api::ApiError;
use seamart_core::{ContentType, FeedItem, FeedQuery, FilterSet, PageCursor};
use serde::Serialize;

use crate::notice::{ErrorNotice, RetryAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadKind {
    /// Page 1, replacing accumulated pages.
    Refresh,
    /// Next page, concatenated onto accumulated pages.
    Append,
}

/// A feed fetch the caller must perform, tagged with the generation it was
/// issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub generation: u64,
    pub kind: LoadKind,
    pub query: FeedQuery,
}

/// A search fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The response changed what is displayed.
    Applied,
    /// A newer request superseded this one; the response was dropped.
    Stale,
    /// Nothing was fetched (no more pages, overlay active, load in flight).
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
struct SearchOverlay {
    query: String,
    results: Vec<FeedItem>,
}

/// Serializable snapshot of what the screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub items: Vec<FeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub page: u32,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<LoadKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<ErrorNotice>,
}

#[derive(Debug, Clone)]
pub struct FeedState {
    filters: FilterSet,
    cursor: PageCursor,
    pages: Vec<FeedItem>,
    overlay: Option<SearchOverlay>,
    generation: u64,
    search_generation: u64,
    in_flight: Option<LoadKind>,
    /// Set until a page-1 load succeeds; the cursor does not describe the
    /// pages on screen in the meantime.
    needs_refresh: bool,
    notice: Option<ErrorNotice>,
}

impl FeedState {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: FilterSet::new(),
            cursor: PageCursor::new(page_size),
            pages: Vec::new(),
            overlay: None,
            generation: 0,
            search_generation: 0,
            in_flight: None,
            needs_refresh: true,
            notice: None,
        }
    }

    /// Starts a page-1 reload with the current filters. Cancels the search
    /// overlay and supersedes every request in flight.
    pub fn begin_refresh(&mut self) -> FeedRequest {
        self.cancel_search();
        self.generation = self.generation.wrapping_add(1);
        self.cursor.reset();
        self.in_flight = Some(LoadKind::Refresh);
        self.needs_refresh = true;
        self.notice = None;
        FeedRequest {
            generation: self.generation,
            kind: LoadKind::Refresh,
            query: FeedQuery::new(self.cursor.page, self.cursor.page_size, self.filters.query_param()),
        }
    }

    /// Flips one filter key and starts the reload it implies.
    pub fn toggle_filter(&mut self, key: ContentType) -> FeedRequest {
        let active = self.filters.toggle(key);
        tracing::debug!(filter = %key, active, "Filter toggled");
        self.begin_refresh()
    }

    /// Replaces the whole filter set and starts a reload.
    pub fn set_filters(&mut self, filters: FilterSet) -> FeedRequest {
        self.filters = filters;
        self.begin_refresh()
    }

    /// Next page request, or `None` when load-more does not apply: the
    /// overlay is active, the feed is exhausted, a load is in flight or the
    /// last reload failed.
    pub fn begin_load_more(&mut self) -> Option<FeedRequest> {
        if !self.can_load_more() {
            return None;
        }
        self.in_flight = Some(LoadKind::Append);
        self.notice = None;
        Some(FeedRequest {
            generation: self.generation,
            kind: LoadKind::Append,
            query: FeedQuery::new(
                self.cursor.next_page(),
                self.cursor.page_size,
                self.filters.query_param(),
            ),
        })
    }

    /// Applies a feed response. A failure leaves displayed data untouched
    /// and records a retryable notice; the error is handed back.
    pub fn complete(
        &mut self,
        request: &FeedRequest,
        result: Result<Vec<FeedItem>, ApiError>,
    ) -> Result<LoadOutcome, ApiError> {
        if request.generation != self.generation {
            tracing::debug!(
                request_generation = request.generation,
                current_generation = self.generation,
                page = request.query.page,
                "Dropping stale feed response"
            );
            return Ok(LoadOutcome::Stale);
        }
        if request.kind == LoadKind::Append && request.query.page != self.cursor.next_page() {
            tracing::debug!(page = request.query.page, "Dropping out-of-sequence page");
            return Ok(LoadOutcome::Stale);
        }
        self.in_flight = None;

        let items = match result {
            Ok(items) => items,
            Err(err) => {
                let action = match request.kind {
                    LoadKind::Refresh => RetryAction::Refresh,
                    LoadKind::Append => RetryAction::LoadMore,
                };
                tracing::warn!(page = request.query.page, error = %err, "Feed load failed");
                self.notice = Some(ErrorNotice::from_api(&err, action));
                return Err(err);
            },
        };

        let returned = items.len();
        match request.kind {
            LoadKind::Refresh => {
                self.pages = items;
                self.needs_refresh = false;
            },
            LoadKind::Append => self.pages.extend(items),
        }
        self.cursor.record(request.query.page, returned);
        self.notice = None;
        tracing::debug!(
            page = request.query.page,
            returned,
            total = self.pages.len(),
            has_more = self.cursor.has_more,
            "Feed page applied"
        );
        Ok(LoadOutcome::Applied)
    }

    /// Registers a search about to be fetched; older searches become stale.
    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        self.search_generation = self.search_generation.wrapping_add(1);
        SearchTicket { generation: self.search_generation, query: query.trim().to_owned() }
    }

    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<FeedItem>, ApiError>,
    ) -> Result<LoadOutcome, ApiError> {
        if ticket.generation != self.search_generation {
            tracing::debug!(query = %ticket.query, "Dropping stale search response");
            return Ok(LoadOutcome::Stale);
        }
        match result {
            Ok(results) => {
                self.open_overlay(&ticket.query, results);
                Ok(LoadOutcome::Applied)
            },
            Err(err) => {
                tracing::warn!(query = %ticket.query, error = %err, "Search failed");
                self.notice = Some(ErrorNotice::from_api(
                    &err,
                    RetryAction::Search { query: ticket.query.clone() },
                ));
                Err(err)
            },
        }
    }

    /// Activates the overlay with externally supplied results. Accumulated
    /// pages are kept as they are underneath. Searches still in flight are
    /// superseded.
    pub fn show_search_results(&mut self, query: &str, results: Vec<FeedItem>) {
        self.search_generation = self.search_generation.wrapping_add(1);
        self.open_overlay(query, results);
    }

    fn open_overlay(&mut self, query: &str, results: Vec<FeedItem>) {
        self.overlay = Some(SearchOverlay { query: query.trim().to_owned(), results });
        self.notice = None;
    }

    /// Drops the overlay, revealing the accumulated pages again.
    pub fn clear_search(&mut self) {
        self.cancel_search();
    }

    fn cancel_search(&mut self) {
        self.search_generation = self.search_generation.wrapping_add(1);
        self.overlay = None;
    }

    /// What the user sees: search results while the overlay is active,
    /// otherwise every accumulated page in arrival order.
    #[must_use]
    pub fn displayed(&self) -> &[FeedItem] {
        match &self.overlay {
            Some(overlay) => &overlay.results,
            None => &self.pages,
        }
    }

    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.overlay.is_none()
            && self.cursor.has_more
            && self.in_flight.is_none()
            && !self.needs_refresh
    }

    #[must_use]
    pub fn is_search_active(&self) -> bool {
        self.overlay.is_some()
    }

    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.overlay.as_ref().map(|o| o.query.as_str())
    }

    #[must_use]
    pub fn feed_pages(&self) -> &[FeedItem] {
        &self.pages
    }

    #[must_use]
    pub const fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&ErrorNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub const fn loading(&self) -> Option<LoadKind> {
        self.in_flight
    }

    #[must_use]
    pub fn view(&self) -> FeedView {
        FeedView {
            items: self.displayed().to_vec(),
            search_query: self.search_query().map(ToOwned::to_owned),
            filter: self.filters.query_param(),
            page: self.cursor.page,
            has_more: self.cursor.has_more,
            loading: self.in_flight,
            notice: self.notice.clone(),
        }
    }
}
