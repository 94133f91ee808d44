//! Purge selection for soft-deleted documents.
//!
//! Soft-deleted documents stay in the store until a scheduled job removes
//! them for good. The job scans the `deleted_documents` view in ascending
//! key order up to a cutoff day; since deletion days are plain `YYYY-MM-DD`
//! strings the scan needs no date parsing, and undated documents
//! (`0000-00-00`) are always selected first.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use docviews::retention::RetentionPolicy;
//!
//! let policy = RetentionPolicy::new(30);
//! let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
//! assert_eq!(policy.cutoff_date(now), "2024-03-01");
//! ```

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::index::{MemoryViewIndex, ViewQuery};
use crate::view::DeletedDocumentsView;

/// Default number of days a soft-deleted document is kept.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Upper bound on the retention window, well inside chrono's date range.
pub const MAX_RETENTION_DAYS: i64 = 1_000_000;

/// How long soft-deleted documents are kept before they are purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    pub retention_days: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy {
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RetentionPolicy {
    pub fn new(retention_days: i64) -> Self {
        RetentionPolicy { retention_days }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ViewError::config(format!(
                "retention_days must be between 0 and {MAX_RETENTION_DAYS}, got {}",
                self.retention_days
            )));
        }
        Ok(())
    }

    /// Last deletion day that is old enough to purge.
    ///
    /// Out-of-range windows are clamped; [`validate`](Self::validate) rejects them.
    pub fn cutoff_date(&self, now: DateTime<Utc>) -> String {
        let days = self.retention_days.clamp(0, MAX_RETENTION_DAYS);
        (now - Duration::days(days))
            .date_naive()
            .format("%Y-%m-%d")
            .to_string()
    }

    /// Scan of `deleted_documents` covering everything up to the cutoff day.
    pub fn query(&self, now: DateTime<Utc>) -> ViewQuery {
        ViewQuery::new().end_key(self.cutoff_date(now))
    }

    /// Storage keys of documents due for purging, oldest deletion day first.
    pub fn purge_candidates(
        &self,
        index: &MemoryViewIndex,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        self.validate()?;
        let rows = index.query(DeletedDocumentsView::NAME, &self.query(now))?;
        debug!(
            "{} purge candidates up to {}",
            rows.len(),
            self.cutoff_date(now)
        );
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    /// Select the candidates and drop their rows from the index.
    pub fn purge(&self, index: &MemoryViewIndex, now: DateTime<Utc>) -> Result<PurgeReport> {
        let cutoff = self.cutoff_date(now);
        let purged = self.purge_candidates(index, now)?;
        for id in &purged {
            index.remove(id);
        }
        info!("purged {} soft-deleted documents up to {cutoff}", purged.len());
        Ok(PurgeReport { cutoff, purged })
    }
}

/// Outcome of a purge run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    /// Cutoff day used, inclusive.
    pub cutoff: String,
    /// Storage keys of purged documents.
    pub purged: Vec<String>,
}
