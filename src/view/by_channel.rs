//! `by_channel`: live documents keyed by `[channel, doc_type]`.

use crate::document::{Document, DocumentMeta};
use crate::view::{IndexEntry, ViewFunction, ViewKey};

/// Emit one `[channel, doc_type]` entry per channel of a live document.
///
/// Channels are visited in the document's order and repeated channels emit
/// repeated entries. A document without channels emits nothing.
pub fn index_by_channel(doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
    if meta.is_sync() || doc.is_deleted() {
        return Vec::new();
    }

    let doc_type = doc.doc_type_or_empty();
    doc.channels
        .iter()
        .map(|channel| IndexEntry::new(ViewKey::pair(channel.as_str(), doc_type)))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ByChannelView;

impl ByChannelView {
    pub const NAME: &'static str = "by_channel";
}

impl ViewFunction for ByChannelView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn map(&self, doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
        index_by_channel(doc, meta)
    }
}
