use docviews::document::{Document, DocumentMeta, StoredDocument};
use docviews::index::{MemoryViewIndex, ViewQuery};
use docviews::view::{
    IndexEntry, UNDATED, ViewKey, ViewRegistry, index_by_channel, index_by_type, index_deleted,
};
use serde_json::json;

fn meta(id: &str) -> DocumentMeta {
    DocumentMeta::new(id)
}

fn keys(entries: Vec<IndexEntry>) -> Vec<ViewKey> {
    entries.into_iter().map(|entry| entry.key).collect()
}

#[test]
fn test_sync_documents_emit_nothing_anywhere() {
    let registry = ViewRegistry::standard();
    let docs = [
        Document::builder().doc_type("T").channels(["a"]).build(),
        Document::builder()
            .doc_type("T")
            .deleted(true)
            .updated("2024-03-15T10:00:00Z")
            .build(),
        Document::default(),
    ];

    for doc in &docs {
        for id in ["_sync", "_sync:seq", "_sync:user:alice", "_sync:att:abc"] {
            for (name, entries) in registry.map_all(doc, &meta(id)) {
                assert!(entries.is_empty(), "{name} emitted for {id}");
            }
        }
    }
}

#[test]
fn test_deleted_partition() {
    let deleted = Document::builder()
        .doc_type("T")
        .channels(["a", "b"])
        .deleted(true)
        .build();
    assert!(index_by_channel(&deleted, &meta("d")).is_empty());
    assert!(index_by_type(&deleted, &meta("d")).is_empty());
    assert_eq!(index_deleted(&deleted, &meta("d")).len(), 1);

    let live = Document::builder().doc_type("T").channels(["a", "b"]).build();
    assert!(index_deleted(&live, &meta("d")).is_empty());
}

#[test]
fn test_channels_with_duplicates() {
    let doc = Document::builder()
        .doc_type("T")
        .channels(["a", "b", "a"])
        .build();

    assert_eq!(
        keys(index_by_channel(&doc, &meta("doc"))),
        vec![
            ViewKey::pair("a", "T"),
            ViewKey::pair("b", "T"),
            ViewKey::pair("a", "T"),
        ]
    );
    assert_eq!(keys(index_by_type(&doc, &meta("doc"))), vec![ViewKey::single("T")]);
}

#[test]
fn test_deletion_day_keys() {
    let doc = Document::builder()
        .deleted(true)
        .updated("2024-03-15T10:00:00Z")
        .build();
    assert_eq!(
        keys(index_deleted(&doc, &meta("doc"))),
        vec![ViewKey::single("2024-03-15")]
    );

    let undated = Document::builder().deleted(true).build();
    assert_eq!(
        keys(index_deleted(&undated, &meta("doc"))),
        vec![ViewKey::single(UNDATED)]
    );
}

#[test]
fn test_empty_channels() {
    let doc = Document::from_value(&json!({"doc_type": "T", "channels": []}));
    assert!(index_by_channel(&doc, &meta("doc")).is_empty());
}

#[test]
fn test_decoded_json_documents() {
    let stored = StoredDocument::from_value(&json!({
        "_id": "job::7",
        "doc_type": "job",
        "channels": ["acct-1", "public"],
        "st_deleted": false,
        "updated": "2024-02-01T09:15:00.123456",
        "title": "ignored"
    }))
    .unwrap();

    assert_eq!(
        keys(index_by_channel(&stored.doc, &stored.meta)),
        vec![ViewKey::pair("acct-1", "job"), ViewKey::pair("public", "job")]
    );
    assert!(index_deleted(&stored.doc, &stored.meta).is_empty());
}

#[test]
fn test_idempotence() {
    let registry = ViewRegistry::standard();
    let doc = Document::builder()
        .doc_type("T")
        .channels(["x", "y"])
        .updated("2024-03-15T10:00:00Z")
        .build();

    let first = serde_json::to_vec(&registry.map_all(&doc, &meta("d"))).unwrap();
    let second = serde_json::to_vec(&registry.map_all(&doc, &meta("d"))).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_document_lifecycle_in_index() {
    let index = MemoryViewIndex::with_standard_views();
    let id = "note::1";

    // create
    index.apply(&StoredDocument::new(
        meta(id),
        Document::builder().doc_type("note").channels(["public"]).build(),
    ));
    let rows = index
        .query("by_channel", &ViewQuery::new().prefix("public"))
        .unwrap();
    assert_eq!(rows.len(), 1);

    // update: channel moves
    index.apply(&StoredDocument::new(
        meta(id),
        Document::builder().doc_type("note").channels(["private"]).build(),
    ));
    assert!(
        index
            .query("by_channel", &ViewQuery::new().prefix("public"))
            .unwrap()
            .is_empty()
    );

    // soft delete
    index.apply(&StoredDocument::new(
        meta(id),
        Document::builder()
            .doc_type("note")
            .channels(["private"])
            .deleted(true)
            .updated("2024-03-15T10:00:00Z")
            .build(),
    ));
    assert_eq!(index.row_count("by_channel"), 0);
    assert_eq!(index.row_count("by_type"), 0);
    let rows = index
        .query("deleted_documents", &ViewQuery::new().key("2024-03-15"))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);

    // undelete
    index.apply(&StoredDocument::new(
        meta(id),
        Document::builder().doc_type("note").build(),
    ));
    assert_eq!(index.row_count("deleted_documents"), 0);
    assert_eq!(index.row_count("by_type"), 1);
}
