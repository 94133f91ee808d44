//! Configuration for the view tooling.
//!
//! Every section has defaults, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "retention": { "retention_days": 14 } }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::retention::RetentionPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Name the registered views are published under.
    pub design_document: String,
    /// Purge window for soft-deleted documents.
    pub retention: RetentionPolicy,
    /// Document feeding.
    pub indexing: IndexingConfig,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            design_document: "docviews".to_string(),
            retention: RetentionPolicy::default(),
            indexing: IndexingConfig::default(),
        }
    }
}

impl ViewsConfig {
    /// Load and validate a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: ViewsConfig = serde_json::from_str(content)
            .map_err(|e| ViewError::config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.design_document.trim().is_empty() {
            return Err(ViewError::config("design_document must not be empty"));
        }
        self.retention.validate()?;
        self.indexing.validate()
    }
}

/// How documents are fed into the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Documents mapped per batch.
    pub batch_size: usize,
    /// Run map functions on the rayon pool.
    pub parallel: bool,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            parallel: true,
        }
    }
}

impl IndexingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ViewError::config("batch_size must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_views_config_default() {
        let config = ViewsConfig::default();
        assert_eq!(config.design_document, "docviews");
        assert_eq!(config.retention.retention_days, 30);
        assert_eq!(config.indexing.batch_size, 1000);
        assert!(config.indexing.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let config =
            ViewsConfig::from_json_str(r#"{"retention": {"retention_days": 14}}"#).unwrap();
        assert_eq!(config.retention.retention_days, 14);
        assert_eq!(config.indexing, IndexingConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(ViewsConfig::from_json_str(r#"{"indexing": {"batch_size": 0}}"#).is_err());
        assert!(ViewsConfig::from_json_str(r#"{"retention": {"retention_days": -3}}"#).is_err());
        assert!(ViewsConfig::from_json_str(r#"{"design_document": " "}"#).is_err());
        assert!(matches!(
            ViewsConfig::from_json_str("{"),
            Err(ViewError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"design_document": "app", "indexing": {{"parallel": false}}}}"#).unwrap();
        file.flush().unwrap();

        let config = ViewsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.design_document, "app");
        assert!(!config.indexing.parallel);
        assert_eq!(config.indexing.batch_size, 1000);
    }
}
