//! In-memory view index.
//!
//! [`memory::MemoryViewIndex`] is a reference implementation of the engine
//! side of the view contract: it feeds every document revision through the
//! registered views, retracts what the previous revision emitted, and serves
//! ordered range scans over each view. The CLI, the retention job and the
//! tests run against it.

pub mod memory;
pub mod query;

pub use memory::MemoryViewIndex;
pub use query::{ViewQuery, ViewRow};
