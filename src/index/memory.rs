//! In-memory view index implementation for testing and tooling.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::document::StoredDocument;
use crate::error::Result;
use crate::index::query::{ViewQuery, ViewRow};
use crate::view::{IndexEntry, ViewKey, ViewRegistry};

/// Position of a row within a view: key, emitting document, emission ordinal.
///
/// The ordinal keeps repeated emits of the same key by the same document as
/// separate rows.
type RowId = (ViewKey, String, usize);

#[derive(Debug, Default)]
struct IndexState {
    /// Rows per view, in key order.
    views: BTreeMap<String, BTreeSet<RowId>>,
    /// Keys each document currently contributes, per view.
    emitted: HashMap<String, BTreeMap<String, Vec<ViewKey>>>,
}

impl IndexState {
    fn retract(&mut self, doc_id: &str) -> usize {
        let Some(previous) = self.emitted.remove(doc_id) else {
            return 0;
        };

        let mut retracted = 0;
        for (view, keys) in previous {
            if let Some(rows) = self.views.get_mut(&view) {
                for (ordinal, key) in keys.into_iter().enumerate() {
                    if rows.remove(&(key, doc_id.to_string(), ordinal)) {
                        retracted += 1;
                    }
                }
            }
        }
        retracted
    }

    fn insert(&mut self, doc_id: &str, emitted: BTreeMap<String, Vec<IndexEntry>>) -> usize {
        let mut inserted = 0;
        let mut contributed = BTreeMap::new();

        for (view, entries) in emitted {
            if entries.is_empty() {
                continue;
            }
            let rows = self.views.entry(view.clone()).or_default();
            let keys: Vec<ViewKey> = entries.into_iter().map(|entry| entry.key).collect();
            for (ordinal, key) in keys.iter().enumerate() {
                rows.insert((key.clone(), doc_id.to_string(), ordinal));
            }
            inserted += keys.len();
            contributed.insert(view, keys);
        }

        if !contributed.is_empty() {
            self.emitted.insert(doc_id.to_string(), contributed);
        }
        inserted
    }
}

/// Materializes every registered view for a set of documents.
///
/// Re-applying a document replaces the rows of its previous revision, so the
/// index always reflects exactly the latest revision of each document.
#[derive(Debug)]
pub struct MemoryViewIndex {
    registry: Arc<ViewRegistry>,
    state: RwLock<IndexState>,
}

impl MemoryViewIndex {
    /// Create an empty index over the given views.
    pub fn new(registry: Arc<ViewRegistry>) -> Self {
        MemoryViewIndex {
            registry,
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Create an empty index over the standard views.
    pub fn with_standard_views() -> Self {
        Self::new(Arc::new(ViewRegistry::standard()))
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Index one document revision. Returns the number of rows it now holds.
    pub fn apply(&self, stored: &StoredDocument) -> usize {
        let emitted = self.registry.map_all(&stored.doc, &stored.meta);
        self.replace(&stored.meta.id, emitted)
    }

    /// Index a batch of revisions.
    ///
    /// Map functions run in parallel; rows are applied in input order, so a
    /// later revision of the same document wins.
    pub fn apply_batch(&self, docs: &[StoredDocument]) -> usize {
        let emitted: Vec<_> = docs
            .par_iter()
            .map(|stored| self.registry.map_all(&stored.doc, &stored.meta))
            .collect();

        let mut state = self.state.write();
        let mut total = 0;
        for (stored, emitted) in docs.iter().zip(emitted) {
            state.retract(&stored.meta.id);
            total += state.insert(&stored.meta.id, emitted);
        }
        debug!("applied batch of {} documents ({total} rows)", docs.len());
        total
    }

    fn replace(&self, doc_id: &str, emitted: BTreeMap<String, Vec<IndexEntry>>) -> usize {
        let mut state = self.state.write();
        let retracted = state.retract(doc_id);
        let inserted = state.insert(doc_id, emitted);
        debug!("indexed {doc_id}: retracted {retracted}, inserted {inserted}");
        inserted
    }

    /// Drop every row of a physically removed document.
    ///
    /// Returns the number of rows retracted.
    pub fn remove(&self, doc_id: &str) -> usize {
        let retracted = self.state.write().retract(doc_id);
        if retracted > 0 {
            debug!("removed {doc_id}: retracted {retracted}");
        }
        retracted
    }

    /// Scan one view.
    pub fn query(&self, view: &str, query: &ViewQuery) -> Result<Vec<ViewRow>> {
        self.registry.require(view)?;

        let state = self.state.read();
        let Some(rows) = state.views.get(view) else {
            return Ok(Vec::new());
        };

        let lower = match query.lower_bound() {
            Some(key) => Bound::Included((key.clone(), String::new(), 0)),
            None => Bound::Unbounded,
        };

        let mut result: Vec<ViewRow> = rows
            .range((lower, Bound::Unbounded))
            .take_while(|(key, _, _)| !query.is_past_end(key))
            .filter(|(key, _, _)| query.matches(key))
            .map(|(key, id, _)| ViewRow {
                key: key.clone(),
                id: id.clone(),
                value: (),
            })
            .collect();

        if query.descending {
            result.reverse();
        }
        if let Some(limit) = query.limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    /// Number of rows in a view.
    pub fn row_count(&self, view: &str) -> usize {
        self.state.read().views.get(view).map_or(0, BTreeSet::len)
    }

    /// Number of documents contributing at least one row.
    pub fn document_count(&self) -> usize {
        self.state.read().emitted.len()
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.views.clear();
        state.emitted.clear();
    }
}
