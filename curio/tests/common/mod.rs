//! Shared fixtures for the retrieval integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use curio::ml::{CrossEncoder, Embedder, EmbeddingVector, HashingEmbedder, MLError};
use curio::models::Metadata;
use curio::storage::{
    Document, InMemoryIndex, KeywordSearch, SearchFilter, SearchHit, SimilarityService,
    StorageError, StorageResult,
};

/// Embedder that maps every text to the same vector.
pub struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    fn name(&self) -> &str {
        "fixed"
    }

    fn dimension(&self) -> usize {
        3
    }

    async fn embed(&self, _text: &str) -> curio::ml::Result<EmbeddingVector> {
        Ok(vec![1.0, 0.0, 0.0])
    }
}

/// Backend returning the same hits for every query.
pub struct FixedIndex {
    hits: Vec<SearchHit>,
}

impl FixedIndex {
    pub fn new(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self { hits })
    }

    fn take(&self, limit: usize) -> Vec<SearchHit> {
        self.hits.iter().take(limit).cloned().collect()
    }
}

#[async_trait]
impl SimilarityService for FixedIndex {
    async fn search(
        &self,
        _vector: &[f32],
        _filter: Option<&SearchFilter>,
        limit: usize,
    ) -> StorageResult<Vec<SearchHit>> {
        Ok(self.take(limit))
    }
}

#[async_trait]
impl KeywordSearch for FixedIndex {
    async fn search_text(
        &self,
        _query: &str,
        _filter: Option<&SearchFilter>,
        limit: usize,
    ) -> StorageResult<Vec<SearchHit>> {
        Ok(self.take(limit))
    }
}

/// Backend that fails every call.
pub struct FailingIndex {
    unavailable: bool,
}

impl FailingIndex {
    /// Fails as if the backend could not be reached
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self { unavailable: true })
    }

    /// Fails as if the query were rejected
    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self { unavailable: false })
    }

    fn error(&self) -> StorageError {
        if self.unavailable {
            StorageError::Unavailable("connection refused".to_string())
        } else {
            StorageError::Query("malformed filter".to_string())
        }
    }
}

#[async_trait]
impl SimilarityService for FailingIndex {
    async fn search(
        &self,
        _vector: &[f32],
        _filter: Option<&SearchFilter>,
        _limit: usize,
    ) -> StorageResult<Vec<SearchHit>> {
        Err(self.error())
    }
}

#[async_trait]
impl KeywordSearch for FailingIndex {
    async fn search_text(
        &self,
        _query: &str,
        _filter: Option<&SearchFilter>,
        _limit: usize,
    ) -> StorageResult<Vec<SearchHit>> {
        Err(self.error())
    }
}

/// Cross-encoder that always errors.
pub struct FailingEncoder;

#[async_trait]
impl CrossEncoder for FailingEncoder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn score_pairs(&self, _pairs: &[(String, String)]) -> curio::ml::Result<Vec<f32>> {
        Err(MLError::reranking("model not loaded"))
    }
}

/// Cross-encoder that returns one score too few.
pub struct ShortEncoder;

#[async_trait]
impl CrossEncoder for ShortEncoder {
    fn name(&self) -> &str {
        "short"
    }

    async fn score_pairs(&self, pairs: &[(String, String)]) -> curio::ml::Result<Vec<f32>> {
        Ok(vec![1.0; pairs.len().saturating_sub(1)])
    }
}

/// Build a hit with `text` and string payload fields.
pub fn hit(id: &str, text: &str, score: f32, fields: &[(&str, &str)]) -> SearchHit {
    let mut payload = Metadata::new();
    payload.insert("text".to_string(), Value::String(text.to_string()));
    for (key, value) in fields {
        payload.insert(key.to_string(), Value::String(value.to_string()));
    }
    SearchHit {
        id: id.to_string(),
        score,
        payload,
    }
}

/// A grade 5 mathematics corpus of `count` fraction lessons with distinct openings.
pub fn fraction_corpus(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| {
            Document::new(format!(
                "Lesson {}: students compare fractions using visual fraction strips. \
                 Partners explain each comparison aloud.",
                i
            ))
            .with_id(format!("lesson-{}", i))
            .with_field("subject", "Mathematics")
            .with_field("grade", "5")
            .with_field("domain", "Number and Operations")
        })
        .collect()
}

/// Index `documents` with a hashing embedder, returning both.
pub async fn indexed(documents: Vec<Document>) -> (Arc<HashingEmbedder>, Arc<InMemoryIndex>) {
    let embedder = Arc::new(HashingEmbedder::new(64));
    let index = Arc::new(InMemoryIndex::new());
    index
        .index_documents(embedder.as_ref(), documents)
        .await
        .expect("indexing should succeed");
    (embedder, index)
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
