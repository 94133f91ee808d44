//! View range queries.

use serde::{Deserialize, Serialize};

use crate::view::ViewKey;

/// A range scan over one view.
///
/// Bounds always describe an ascending key range; `descending` only reverses
/// the order rows come back in. `limit` is applied last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    /// Exact key match.
    pub key: Option<ViewKey>,
    /// Lowest key returned (inclusive).
    pub start_key: Option<ViewKey>,
    /// Highest key returned.
    pub end_key: Option<ViewKey>,
    /// Whether `end_key` itself is returned.
    pub inclusive_end: bool,
    /// Leading components every returned key must share.
    pub prefix: Option<ViewKey>,
    pub descending: bool,
    pub limit: Option<usize>,
}

impl Default for ViewQuery {
    fn default() -> Self {
        ViewQuery {
            key: None,
            start_key: None,
            end_key: None,
            inclusive_end: true,
            prefix: None,
            descending: false,
            limit: None,
        }
    }
}

impl ViewQuery {
    /// A query returning every row.
    pub fn new() -> Self {
        ViewQuery::default()
    }

    pub fn key<K: Into<ViewKey>>(mut self, key: K) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn start_key<K: Into<ViewKey>>(mut self, key: K) -> Self {
        self.start_key = Some(key.into());
        self
    }

    pub fn end_key<K: Into<ViewKey>>(mut self, key: K) -> Self {
        self.end_key = Some(key.into());
        self
    }

    pub fn inclusive_end(mut self, inclusive: bool) -> Self {
        self.inclusive_end = inclusive;
        self
    }

    pub fn prefix<K: Into<ViewKey>>(mut self, prefix: K) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Smallest key that can match.
    pub(crate) fn lower_bound(&self) -> Option<&ViewKey> {
        [&self.key, &self.start_key, &self.prefix]
            .into_iter()
            .flatten()
            .max()
    }

    /// Whether `key` and every key after it lie beyond the range.
    pub(crate) fn is_past_end(&self, key: &ViewKey) -> bool {
        if let Some(exact) = &self.key
            && key > exact
        {
            return true;
        }
        if let Some(end) = &self.end_key {
            let past = if self.inclusive_end { key > end } else { key >= end };
            if past {
                return true;
            }
        }
        if let Some(prefix) = &self.prefix
            && key > prefix
            && !key.starts_with(prefix)
        {
            return true;
        }
        false
    }

    /// Whether `key` lies inside the range.
    pub fn matches(&self, key: &ViewKey) -> bool {
        if self.lower_bound().is_some_and(|lower| key < lower) || self.is_past_end(key) {
            return false;
        }
        if self.key.as_ref().is_some_and(|exact| key != exact) {
            return false;
        }
        self.prefix
            .as_ref()
            .is_none_or(|prefix| key.starts_with(prefix))
    }
}

/// One row returned by a view query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRow {
    pub key: ViewKey,
    /// Storage key of the emitting document.
    pub id: String,
    #[serde(default)]
    pub value: (),
}
