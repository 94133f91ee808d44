//! # docviews
//!
//! Derived-index view definitions for a channel-partitioned document store.
//!
//! Each view is a pure function from one stored document to zero or more
//! index entries. The index engine calls it on every document revision and
//! keeps the entries sorted by key for range scans.
//!
//! ## Views
//!
//! - `by_channel` - live documents keyed by `[channel, doc_type]`
//! - `by_type` - live documents keyed by `doc_type`
//! - `deleted_documents` - soft-deleted documents keyed by deletion day
//!
//! ## Features
//!
//! - Permissive typed decoding of loosely shaped JSON documents
//! - Explicit view registry, no global state
//! - In-memory reference index with retract-then-apply semantics
//! - Retention cutoff and purge candidate selection
//! - CLI for inspecting views over a JSONL export

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod retention;
pub mod view;

pub mod prelude {
    pub use crate::document::{Document, DocumentMeta, StoredDocument};
    pub use crate::error::{Result, ViewError};
    pub use crate::index::{MemoryViewIndex, ViewQuery, ViewRow};
    pub use crate::retention::RetentionPolicy;
    pub use crate::view::{IndexEntry, ViewFunction, ViewKey, ViewRegistry};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
