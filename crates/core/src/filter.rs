//! Active content-type filters for the feed.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::CoreError;
use crate::feed_item::ContentType;

/// Set of content types the feed is narrowed to.
///
/// An empty set and the full set both mean "no filtering"; only a strict,
/// non-empty subset produces a query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    keys: BTreeSet<ContentType>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` if absent, removes it otherwise. Returns whether it is
    /// active after the toggle.
    pub fn toggle(&mut self, key: ContentType) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, key: ContentType) -> bool {
        self.keys.contains(&key)
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.keys.is_empty() || self.keys.len() == ContentType::ALL.len()
    }

    /// Comma-joined keys in canonical order, or `None` when unfiltered.
    #[must_use]
    pub fn query_param(&self) -> Option<String> {
        if self.is_unfiltered() {
            return None;
        }
        Some(self.keys.iter().map(ContentType::as_str).collect::<Vec<_>>().join(","))
    }
}

impl FromIterator<ContentType> for FilterSet {
    fn from_iter<I: IntoIterator<Item = ContentType>>(iter: I) -> Self {
        Self { keys: iter.into_iter().collect() }
    }
}

impl FromStr for FilterSet {
    type Err = CoreError;

    /// Parses a comma list such as `"shop,user"`. Blank segments are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ContentType::from_str)
            .collect()
    }
}
