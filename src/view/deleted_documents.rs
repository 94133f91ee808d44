//! `deleted_documents`: soft-deleted documents keyed by deletion day.
//!
//! The purge job walks this view in ascending key order up to a cutoff day,
//! so every deleted document must land on some comparable date string.
//! Documents without a usable `updated` timestamp get [`UNDATED`], which
//! sorts before every real date and makes them the first purge candidates.

use crate::document::{Document, DocumentMeta};
use crate::view::{IndexEntry, ViewFunction, ViewKey};

/// Deletion day for documents that carry no timestamp.
pub const UNDATED: &str = "0000-00-00";

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
const DAY_LEN: usize = 10;

/// The day part of `updated`: its first ten characters, no validation.
fn deletion_day(updated: Option<&str>) -> &str {
    match updated {
        Some(ts) if !ts.is_empty() => match ts.char_indices().nth(DAY_LEN) {
            Some((end, _)) => &ts[..end],
            None => ts,
        },
        _ => UNDATED,
    }
}

/// Emit exactly one deletion-day entry for a soft-deleted document.
pub fn index_deleted(doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
    if meta.is_sync() || !doc.is_deleted() {
        return Vec::new();
    }

    vec![IndexEntry::new(ViewKey::single(deletion_day(
        doc.updated.as_deref(),
    )))]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeletedDocumentsView;

impl DeletedDocumentsView {
    pub const NAME: &'static str = "deleted_documents";
}

impl ViewFunction for DeletedDocumentsView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn map(&self, doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
        index_deleted(doc, meta)
    }
}
