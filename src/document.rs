//! Document module for view indexing.
//!
//! This module provides the record types that views consume. Stored documents
//! are loosely shaped JSON; here they are decoded once into an explicit
//! [`document::Document`] whose optional fields carry the "absent behaves as
//! empty" contract, paired with the store's [`document::DocumentMeta`].
//!
//! # Core Components
//!
//! - [`document::Document`] - Typed view of a stored document
//! - [`document::DocumentMeta`] - Storage metadata (the storage key)
//! - [`document::StoredDocument`] - A document together with its metadata
//! - [`converter`] - Utilities for reading documents from JSONL files
//!
//! # Examples
//!
//! ```
//! use docviews::document::{Document, DocumentMeta};
//!
//! let doc = Document::builder()
//!     .id("note::1")
//!     .doc_type("note")
//!     .channels(["public", "team"])
//!     .build();
//!
//! assert_eq!(doc.doc_type_or_empty(), "note");
//! assert!(!DocumentMeta::new("note::1").is_sync());
//! assert!(DocumentMeta::new("_sync:seq").is_sync());
//! ```

pub mod converter;
#[allow(clippy::module_inception)]
pub mod document;
pub(crate) mod lenient;

// Re-export commonly used types
pub use document::{Document, DocumentBuilder, DocumentMeta, StoredDocument, SYNC_PREFIX};
