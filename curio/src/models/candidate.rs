//! Unranked retrieval candidates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Payload fields attached to a candidate, minus its text.
pub type Metadata = serde_json::Map<String, Value>;

/// A `(content, metadata, score)` tuple produced by a search backend or a
/// resource provider, before final sorting and truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalCandidate {
    /// Document text
    pub content: String,

    /// Payload fields such as `subject`, `grade`, `source`, `domain`,
    /// `resource_url` and `cached_at`
    pub metadata: Metadata,

    /// Backend or pipeline score, higher is better
    pub score: f32,
}

impl RetrievalCandidate {
    /// Create a candidate with empty metadata.
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
            score,
        }
    }

    /// Create a candidate from its parts.
    pub fn with_metadata(content: impl Into<String>, metadata: Metadata, score: f32) -> Self {
        Self {
            content: content.into(),
            metadata,
            score,
        }
    }

    /// Set a metadata field, returning the candidate.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// String value of a metadata field, if present and a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// The `source` tag, if any.
    pub fn source(&self) -> Option<&str> {
        self.metadata_str("source")
    }

    /// Same candidate with its score multiplied by `factor`.
    pub fn scaled(mut self, factor: f32) -> Self {
        self.score *= factor;
        self
    }
}

/// Sort candidates by descending score.
///
/// The sort is stable, so candidates with equal scores keep their input
/// order. NaN scores sort last.
pub fn sort_by_score(candidates: &mut [RetrievalCandidate]) {
    candidates.sort_by(|a, b| compare_scores(b.score, a.score));
}

pub(crate) fn compare_scores(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
