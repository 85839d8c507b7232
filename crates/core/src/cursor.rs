//! Pagination cursor and the query one feed load is made of.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, FIRST_PAGE};

/// Page counter plus the "has more" flag.
///
/// Advanced only by explicit load-more triggers; reset to the first page
/// on refresh or filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    /// A zero page size is bumped to 1 so a page can never be "short" by
    /// construction.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self { page: FIRST_PAGE, page_size: page_size.max(1), has_more: true }
    }

    pub fn reset(&mut self) {
        self.page = FIRST_PAGE;
        self.has_more = true;
    }

    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.page.saturating_add(1)
    }

    /// Records a loaded page. A page shorter than `page_size` ends the feed.
    pub fn record(&mut self, page: u32, returned: usize) {
        self.page = page;
        self.has_more = returned >= self.page_size as usize;
    }
}

/// Parameters of a single feed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl FeedQuery {
    #[must_use]
    pub fn new(page: u32, page_size: u32, filter: Option<String>) -> Self {
        Self { page, page_size, filter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_page_ends_pagination() {
        let mut cursor = PageCursor::new(10);
        cursor.record(1, 10);
        assert!(cursor.has_more);
        cursor.record(2, 4);
        assert!(!cursor.has_more);
        assert_eq!(cursor.page, 2);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut cursor = PageCursor::new(5);
        cursor.record(3, 0);
        cursor.reset();
        assert_eq!(cursor.page, FIRST_PAGE);
        assert!(cursor.has_more);
        assert_eq!(cursor.next_page(), 2);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let mut cursor = PageCursor::new(0);
        assert_eq!(cursor.page_size, 1);
        cursor.record(1, 1);
        assert!(cursor.has_more);
    }
}
