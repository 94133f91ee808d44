//! `by_type`: live documents keyed by `doc_type`.

use crate::document::{Document, DocumentMeta};
use crate::view::{IndexEntry, ViewFunction, ViewKey};

/// Emit exactly one `doc_type` entry for a live document.
pub fn index_by_type(doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
    if meta.is_sync() || doc.is_deleted() {
        return Vec::new();
    }

    vec![IndexEntry::new(ViewKey::single(doc.doc_type_or_empty()))]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ByTypeView;

impl ByTypeView {
    pub const NAME: &'static str = "by_type";
}

impl ViewFunction for ByTypeView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn map(&self, doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
        index_by_type(doc, meta)
    }
}
