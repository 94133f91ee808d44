//! Error types for the docviews library.
//!
//! Map functions never fail; errors only arise around them, when decoding
//! input files, loading configuration, registering views or querying the
//! in-memory index. All of those are represented by [`ViewError`].
//!
//! Registering a view whose name is taken is a [`ViewError::View`]; looking
//! up or querying a view that is not registered is a [`ViewError::Query`].
//!
//! # Examples
//!
//! ```
//! use docviews::error::{ViewError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ViewError::query("unknown view: by_color"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for docviews operations.
#[derive(Error, Debug)]
pub enum ViewError {
    /// I/O errors (reading input or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document decoding errors
    #[error("Document error: {0}")]
    Document(String),

    /// View registration errors (duplicate names)
    #[error("View error: {0}")]
    View(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Query errors (unknown view lookups, malformed keys)
    #[error("Query error: {0}")]
    Query(String),
}

/// Result type alias for operations that may fail with ViewError.
pub type Result<T> = std::result::Result<T, ViewError>;

impl ViewError {
    /// Create a new document error.
    pub fn document<S: Into<String>>(msg: S) -> Self {
        ViewError::Document(msg.into())
    }

    /// Create a new view error.
    pub fn view<S: Into<String>>(msg: S) -> Self {
        ViewError::View(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ViewError::Config(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        ViewError::Query(msg.into())
    }
}
