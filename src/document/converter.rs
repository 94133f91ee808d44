//! Document converter for reading stored documents from files.
//!
//! This module provides a DocumentConverter trait and the JSONL
//! implementation used by the CLI to feed documents through the views.

use std::path::Path;

use crate::document::document::StoredDocument;
use crate::error::Result;

pub mod jsonl;

/// A trait for converting file formats into stored-document iterators.
///
/// # Example
///
/// ```no_run
/// use docviews::document::converter::DocumentConverter;
/// use docviews::document::converter::jsonl::JsonlDocumentConverter;
///
/// let converter = JsonlDocumentConverter::new();
/// for stored in converter.convert("bucket.jsonl").unwrap() {
///     let stored = stored.unwrap();
///     println!("{} -> {:?}", stored.meta.id, stored.doc.doc_type);
/// }
/// ```
pub trait DocumentConverter {
    /// The iterator type that yields documents.
    type Iter: Iterator<Item = Result<StoredDocument>>;

    /// Convert a file into an iterator of stored documents.
    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter>;

    /// Convert a whole file, failing on the first bad record.
    fn convert_all<P: AsRef<Path>>(&self, path: P) -> Result<Vec<StoredDocument>> {
        self.convert(path)?.collect()
    }
}
