//! View definitions.
//!
//! A view is a pure map function from one stored document to zero or more
//! [`IndexEntry`] values. The index engine calls every registered view on each
//! document revision, retracts what the previous revision emitted and keeps
//! the new entries sorted by [`ViewKey`].
//!
//! Three views are defined:
//!
//! - [`by_channel`] - `[channel, doc_type]` for every channel of a live document
//! - [`by_type`] - `doc_type` for every live document
//! - [`deleted_documents`] - deletion day (`YYYY-MM-DD`) for soft-deleted documents
//!
//! Sync-layer bookkeeping documents (storage keys starting with `_sync`) never
//! reach any view.
//!
//! # Examples
//!
//! ```
//! use docviews::document::{Document, DocumentMeta};
//! use docviews::view::{ViewFunction, ViewKey, ViewRegistry};
//!
//! let registry = ViewRegistry::standard();
//! let doc = Document::builder()
//!     .doc_type("T")
//!     .channels(["a", "b", "a"])
//!     .build();
//! let meta = DocumentMeta::new("doc-1");
//!
//! let by_channel = registry.get("by_channel").unwrap();
//! let keys: Vec<ViewKey> = by_channel
//!     .map(&doc, &meta)
//!     .into_iter()
//!     .map(|entry| entry.key)
//!     .collect();
//! assert_eq!(
//!     keys,
//!     vec![
//!         ViewKey::pair("a", "T"),
//!         ViewKey::pair("b", "T"),
//!         ViewKey::pair("a", "T"),
//!     ]
//! );
//! ```

use std::fmt;

use crate::document::{Document, DocumentMeta};

pub mod by_channel;
pub mod by_type;
pub mod deleted_documents;
pub mod entry;
pub mod registry;

pub use by_channel::{ByChannelView, index_by_channel};
pub use by_type::{ByTypeView, index_by_type};
pub use deleted_documents::{DeletedDocumentsView, UNDATED, index_deleted};
pub use entry::{IndexEntry, ViewKey};
pub use registry::{DesignDocument, ViewRegistry};

/// A map function bound to a view name.
///
/// Implementations must be pure: the output depends only on the two inputs,
/// so the engine may call them from any thread and replay them freely.
pub trait ViewFunction: Send + Sync + fmt::Debug {
    /// The name the view is registered and queried under.
    fn name(&self) -> &str;

    /// Emit the entries this document contributes to the view.
    fn map(&self, doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry>;
}
