//! Named view registry.
//!
//! The registry is built once at startup and handed to the index engine by
//! reference. There is no global view table.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentMeta};
use crate::error::{Result, ViewError};
use crate::view::{ByChannelView, ByTypeView, DeletedDocumentsView, IndexEntry, ViewFunction};

/// Explicit mapping from view name to map function.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: BTreeMap<String, Arc<dyn ViewFunction>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ViewRegistry::default()
    }

    /// Registry holding `by_channel`, `by_type` and `deleted_documents`.
    pub fn standard() -> Self {
        let mut registry = ViewRegistry::new();
        registry.insert(Arc::new(ByChannelView));
        registry.insert(Arc::new(ByTypeView));
        registry.insert(Arc::new(DeletedDocumentsView));
        registry
    }

    fn insert(&mut self, view: Arc<dyn ViewFunction>) {
        self.views.insert(view.name().to_string(), view);
    }

    /// Register a view under its own name.
    pub fn register(&mut self, view: Arc<dyn ViewFunction>) -> Result<()> {
        let name = view.name().to_string();
        if self.views.contains_key(&name) {
            return Err(ViewError::view(format!("duplicate view name: {name}")));
        }
        debug!("registered view {name}");
        self.insert(view);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ViewFunction>> {
        self.views.get(name)
    }

    /// Like [`get`](Self::get), but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&Arc<dyn ViewFunction>> {
        self.get(name)
            .ok_or_else(|| ViewError::query(format!("unknown view: {name}")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// View names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        self.views.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn ViewFunction>)> {
        self.views.iter().map(|(name, view)| (name.as_str(), view))
    }

    /// Run every registered view over one document.
    pub fn map_all(
        &self,
        doc: &Document,
        meta: &DocumentMeta,
    ) -> BTreeMap<String, Vec<IndexEntry>> {
        self.views
            .iter()
            .map(|(name, view)| (name.clone(), view.map(doc, meta)))
            .collect()
    }

    /// Describe the registered views as one design document.
    pub fn design_document<S: Into<String>>(&self, name: S) -> DesignDocument {
        DesignDocument {
            name: name.into(),
            views: self.names().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Publishable description of a set of map-only views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub name: String,
    pub views: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewKey;

    #[derive(Debug)]
    struct ByIdView;

    impl ViewFunction for ByIdView {
        fn name(&self) -> &str {
            "by_id"
        }

        fn map(&self, _doc: &Document, meta: &DocumentMeta) -> Vec<IndexEntry> {
            vec![IndexEntry::new(meta.id.as_str())]
        }
    }

    #[test]
    fn test_standard_registry() {
        let registry = ViewRegistry::standard();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.names(),
            vec!["by_channel", "by_type", "deleted_documents"]
        );
        for (name, view) in registry.iter() {
            assert_eq!(name, view.name());
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ViewRegistry::standard();
        registry.register(Arc::new(ByIdView)).unwrap();
        assert!(registry.contains("by_id"));

        let err = registry.register(Arc::new(ByTypeView)).unwrap_err();
        assert!(matches!(err, ViewError::View(_)));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_require_unknown_view() {
        let registry = ViewRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(registry.require("by_type"), Err(ViewError::Query(_))));
    }

    #[test]
    fn test_map_all() {
        let registry = ViewRegistry::standard();
        let doc = Document::builder().doc_type("T").channel("a").build();
        let emitted = registry.map_all(&doc, &DocumentMeta::new("d"));

        assert_eq!(emitted["by_channel"], vec![IndexEntry::new(ViewKey::pair("a", "T"))]);
        assert_eq!(emitted["by_type"], vec![IndexEntry::new("T")]);
        assert!(emitted["deleted_documents"].is_empty());
    }

    #[test]
    fn test_design_document() {
        let design = ViewRegistry::standard().design_document("docviews");
        assert_eq!(design.name, "docviews");
        assert_eq!(design.views, vec!["by_channel", "by_type", "deleted_documents"]);
    }
}
