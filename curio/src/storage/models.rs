//! Documents and search hits exchanged with search backends

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Metadata, RetrievalCandidate};

/// Payload key holding the document text.
pub const TEXT_FIELD: &str = "text";

/// A ranked hit returned by a similarity or keyword backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Backend document id
    pub id: String,

    /// Backend score, higher is better
    pub score: f32,

    /// Stored payload, including the `text` field
    pub payload: Metadata,
}

impl SearchHit {
    /// The document text, empty if the payload has none.
    pub fn text(&self) -> &str {
        self.payload
            .get(TEXT_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Split the payload into content and metadata.
    pub fn into_candidate(mut self) -> RetrievalCandidate {
        let content = match self.payload.remove(TEXT_FIELD) {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        RetrievalCandidate::with_metadata(content, self.payload, self.score)
    }
}

/// A document to index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id; generated when indexing if absent
    #[serde(default)]
    pub id: Option<String>,

    /// Document text
    pub text: String,

    /// Payload fields such as `subject`, `grade`, `source`
    #[serde(default)]
    pub fields: Metadata,
}

impl Document {
    /// Create a document with no fields
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            fields: Metadata::new(),
        }
    }

    /// Set the document id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The stored payload: the fields plus the text.
    pub fn payload(&self) -> Metadata {
        let mut payload = self.fields.clone();
        payload.insert(TEXT_FIELD.to_string(), Value::String(self.text.clone()));
        payload
    }
}
