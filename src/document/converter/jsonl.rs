//! JSONL format document converter.
//!
//! Each non-blank line holds one stored document, either as an envelope or
//! as a bare document keyed by its `_id`/`id`:
//! ```jsonl
//! {"meta": {"id": "_sync:seq"}, "doc": {"value": 42}}
//! {"_id": "note::1", "doc_type": "note", "channels": ["public"]}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::document::converter::DocumentConverter;
use crate::document::document::StoredDocument;
use crate::error::{Result, ViewError};

/// A document converter for JSONL format.
#[derive(Clone, Debug, Default)]
pub struct JsonlDocumentConverter;

impl JsonlDocumentConverter {
    /// Create a new JSONL converter.
    pub fn new() -> Self {
        JsonlDocumentConverter
    }

    /// Parse a single JSON line into a stored document.
    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<StoredDocument> {
        let value: Value = serde_json::from_str(line).map_err(|e| {
            ViewError::document(format!("line {line_number}: invalid JSON: {e}"))
        })?;

        StoredDocument::from_value(&value).map_err(|e| match e {
            ViewError::Document(msg) => ViewError::document(format!("line {line_number}: {msg}")),
            other => other,
        })
    }
}

/// Iterator over JSONL documents.
pub struct JsonlDocumentIterator {
    reader: BufReader<File>,
    converter: JsonlDocumentConverter,
    line_number: usize,
}

impl Iterator for JsonlDocumentIterator {
    type Item = Result<StoredDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            self.line_number += 1;
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(self.converter.parse_line(line, self.line_number));
                }
                Err(e) => return Some(Err(ViewError::Io(e))),
            }
        }
    }
}

impl DocumentConverter for JsonlDocumentConverter {
    type Iter = JsonlDocumentIterator;

    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter> {
        debug!("reading documents from {}", path.as_ref().display());
        let file = File::open(path.as_ref())?;

        Ok(JsonlDocumentIterator {
            reader: BufReader::new(file),
            converter: self.clone(),
            line_number: 0,
        })
    }
}
