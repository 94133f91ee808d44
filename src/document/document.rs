//! Document structure for view indexing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::lenient;
use crate::error::{Result, ViewError};

/// Storage key prefix reserved for the sync layer's bookkeeping documents.
pub const SYNC_PREFIX: &str = "_sync";

/// A stored document as seen by the views.
///
/// Only the fields the views read are decoded; everything else in the stored
/// JSON is ignored. Decoding is permissive: a field that is missing or has an
/// unexpected type falls back to its empty value rather than failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct Document {
    /// The document's key within the store.
    pub id: String,
    /// Classification tag. `None` renders as an empty key component.
    pub doc_type: Option<String>,
    /// Channels the document belongs to, in the document's own order.
    pub channels: Vec<String>,
    /// Soft-delete flag.
    pub st_deleted: bool,
    /// Last modification time, `YYYY-MM-DDTHH:MM:SS...`.
    pub updated: Option<String>,
}

/// Wire shape of a stored document. Both `_id` and `id` may be present.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default, rename = "_id", deserialize_with = "lenient::text")]
    underscore_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    doc_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::channel_list")]
    channels: Vec<String>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    st_deleted: bool,
    #[serde(default, deserialize_with = "lenient::string_only")]
    updated: Option<String>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        Document {
            id: raw.underscore_id.or(raw.id).unwrap_or_default(),
            doc_type: raw.doc_type,
            channels: raw.channels,
            st_deleted: raw.st_deleted,
            updated: raw.updated,
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Document {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Decode a document from an arbitrary JSON value.
    ///
    /// Non-object values decode to an empty document.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Document::deserialize(value).unwrap_or_default(),
            _ => Document::default(),
        }
    }

    /// The type tag, or `""` when absent.
    pub fn doc_type_or_empty(&self) -> &str {
        self.doc_type.as_deref().unwrap_or("")
    }

    /// Whether the document is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.st_deleted
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Set the document id.
    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.document.id = id.into();
        self
    }

    /// Set the type tag.
    pub fn doc_type<S: Into<String>>(mut self, doc_type: S) -> Self {
        self.document.doc_type = Some(doc_type.into());
        self
    }

    /// Append a single channel.
    pub fn channel<S: Into<String>>(mut self, channel: S) -> Self {
        self.document.channels.push(channel.into());
        self
    }

    /// Append several channels, keeping their order.
    pub fn channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document
            .channels
            .extend(channels.into_iter().map(Into::into));
        self
    }

    /// Set the soft-delete flag.
    pub fn deleted(mut self, deleted: bool) -> Self {
        self.document.st_deleted = deleted;
        self
    }

    /// Set the last modification timestamp.
    pub fn updated<S: Into<String>>(mut self, updated: S) -> Self {
        self.document.updated = Some(updated.into());
        self
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}

/// Metadata the store hands over alongside each document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Storage key.
    pub id: String,
}

impl DocumentMeta {
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocumentMeta { id: id.into() }
    }

    /// Whether this is a sync-layer bookkeeping document.
    ///
    /// Keys shorter than the prefix simply do not match.
    pub fn is_sync(&self) -> bool {
        self.id.starts_with(SYNC_PREFIX)
    }
}

/// A document paired with its storage metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub meta: DocumentMeta,
    pub doc: Document,
}

impl StoredDocument {
    pub fn new(meta: DocumentMeta, doc: Document) -> Self {
        StoredDocument { meta, doc }
    }

    /// Store a document under its own id.
    pub fn from_document(doc: Document) -> Self {
        StoredDocument {
            meta: DocumentMeta::new(doc.id.clone()),
            doc,
        }
    }

    /// Decode one input record.
    ///
    /// Accepts either an envelope `{"meta": {"id": ..}, "doc": {..}}` or a bare
    /// document whose storage key is its `_id` (or `id`) field.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ViewError::document("record is not a JSON object"))?;

        if let (Some(meta), Some(doc)) = (object.get("meta"), object.get("doc")) {
            let meta: DocumentMeta = serde_json::from_value(meta.clone())
                .map_err(|e| ViewError::document(format!("invalid meta: {e}")))?;
            return Ok(StoredDocument::new(meta, Document::from_value(doc)));
        }

        let key = ["_id", "id"]
            .iter()
            .find_map(|field| object.get(*field).and_then(Value::as_str))
            .ok_or_else(|| ViewError::document("record has no storage key (_id or id)"))?;

        Ok(StoredDocument::new(
            DocumentMeta::new(key),
            Document::from_value(value),
        ))
    }
}
