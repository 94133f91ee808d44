//! Property-based tests for the view invariants.
//!
//! Documents are generated with arbitrary channels, types, flags and
//! timestamps; storage keys are drawn both from the `_sync` namespace and
//! from ordinary keys.

use docviews::document::{Document, DocumentMeta};
use docviews::view::{
    UNDATED, ViewKey, ViewRegistry, index_by_channel, index_by_type, index_deleted,
};
use proptest::prelude::*;

fn arb_document() -> impl Strategy<Value = Document> {
    (
        proptest::option::of("[a-z]{0,6}"),
        proptest::collection::vec("[a-c]{1,2}", 0..6),
        any::<bool>(),
        proptest::option::of("[0-9T:-]{0,24}"),
    )
        .prop_map(|(doc_type, channels, st_deleted, updated)| Document {
            id: String::new(),
            doc_type,
            channels,
            st_deleted,
            updated,
        })
}

fn arb_meta() -> impl Strategy<Value = DocumentMeta> {
    prop_oneof![
        "_sync[:a-z]{0,8}".prop_map(DocumentMeta::new),
        "[a-z_:]{0,8}".prop_map(DocumentMeta::new),
    ]
}

proptest! {
    #[test]
    fn prop_sync_documents_never_emit(doc in arb_document(), suffix in "[:a-z0-9]{0,10}") {
        let meta = DocumentMeta::new(format!("_sync{suffix}"));
        prop_assert!(index_by_channel(&doc, &meta).is_empty());
        prop_assert!(index_by_type(&doc, &meta).is_empty());
        prop_assert!(index_deleted(&doc, &meta).is_empty());
    }

    #[test]
    fn prop_deleted_and_live_views_partition(doc in arb_document(), meta in arb_meta()) {
        let by_channel = index_by_channel(&doc, &meta);
        let by_type = index_by_type(&doc, &meta);
        let deleted = index_deleted(&doc, &meta);

        if meta.is_sync() {
            prop_assert!(by_channel.is_empty() && by_type.is_empty() && deleted.is_empty());
        } else if doc.st_deleted {
            prop_assert!(by_channel.is_empty());
            prop_assert!(by_type.is_empty());
            prop_assert_eq!(deleted.len(), 1);
        } else {
            prop_assert_eq!(by_channel.len(), doc.channels.len());
            prop_assert_eq!(by_type.len(), 1);
            prop_assert!(deleted.is_empty());
        }
    }

    #[test]
    fn prop_channel_keys_follow_document_order(doc in arb_document()) {
        let meta = DocumentMeta::new("doc");
        let doc = Document { st_deleted: false, ..doc };
        let expected: Vec<ViewKey> = doc
            .channels
            .iter()
            .map(|c| ViewKey::pair(c.as_str(), doc.doc_type_or_empty()))
            .collect();
        let actual: Vec<ViewKey> = index_by_channel(&doc, &meta)
            .into_iter()
            .map(|e| e.key)
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_deletion_day_is_prefix_or_sentinel(doc in arb_document()) {
        let doc = Document { st_deleted: true, ..doc };
        let entries = index_deleted(&doc, &DocumentMeta::new("doc"));
        prop_assert_eq!(entries.len(), 1);

        let day = entries[0].key.first().unwrap_or_default().to_string();
        match doc.updated.as_deref() {
            Some(ts) if !ts.is_empty() => {
                prop_assert!(ts.starts_with(&day));
                prop_assert_eq!(day.chars().count(), ts.chars().count().min(10));
            }
            _ => prop_assert_eq!(day, UNDATED),
        }
    }

    #[test]
    fn prop_mapping_is_idempotent(doc in arb_document(), meta in arb_meta()) {
        let registry = ViewRegistry::standard();
        let first = registry.map_all(&doc, &meta);
        let second = registry.map_all(&doc, &meta);
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
