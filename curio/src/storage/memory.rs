//! In-memory similarity and keyword index

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::ml::{Embedder, cosine_similarity, tokenizer::tokenize};
use crate::models::Metadata;
use crate::models::candidate::compare_scores;
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::filters::SearchFilter;
use crate::storage::models::{Document, SearchHit};
use crate::storage::traits::{KeywordSearch, SimilarityService};

const BM25_K1: f32 = 1.2;
const BM25_B: f32 = 0.75;

#[derive(Debug)]
struct StoredDocument {
    id: String,
    vector: Vec<f32>,
    payload: Metadata,
    term_counts: HashMap<String, usize>,
    length: usize,
}

/// A small vector index that also answers BM25 keyword queries.
///
/// Documents are scanned linearly, which suits corpora of a few thousand
/// entries. Ties keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    documents: RwLock<Vec<StoredDocument>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document with a precomputed vector, returning its id.
    ///
    /// All vectors in one index must share a dimension.
    pub async fn insert(&self, document: Document, vector: Vec<f32>) -> StorageResult<String> {
        let mut documents = self.documents.write().await;
        if let Some(first) = documents.first()
            && first.vector.len() != vector.len()
        {
            return Err(StorageError::Validation(format!(
                "vector dimension {} does not match index dimension {}",
                vector.len(),
                first.vector.len()
            )));
        }

        let id = document
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let tokens = tokenize(&document.text);
        let mut term_counts = HashMap::new();
        for token in &tokens {
            *term_counts.entry(token.clone()).or_insert(0) += 1;
        }

        documents.push(StoredDocument {
            id: id.clone(),
            vector,
            payload: document.payload(),
            term_counts,
            length: tokens.len(),
        });
        Ok(id)
    }

    /// Embed and store a document, returning its id.
    pub async fn index_document(
        &self,
        embedder: &dyn Embedder,
        document: Document,
    ) -> crate::Result<String> {
        let vector = embedder.embed(&document.text).await?;
        Ok(self.insert(document, vector).await?)
    }

    /// Embed and store several documents in order.
    pub async fn index_documents(
        &self,
        embedder: &dyn Embedder,
        documents: impl IntoIterator<Item = Document>,
    ) -> crate::Result<Vec<String>> {
        let mut ids = Vec::new();
        for document in documents {
            ids.push(self.index_document(embedder, document).await?);
        }
        debug!(count = ids.len(), "Indexed documents");
        Ok(ids)
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the index is empty
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn rank(mut hits: Vec<SearchHit>, limit: usize) -> Vec<SearchHit> {
    hits.sort_by(|a, b| compare_scores(b.score, a.score));
    hits.truncate(limit);
    hits
}

#[async_trait]
impl SimilarityService for InMemoryIndex {
    async fn search(
        &self,
        vector: &[f32],
        filter: Option<&SearchFilter>,
        limit: usize,
    ) -> StorageResult<Vec<SearchHit>> {
        let documents = self.documents.read().await;
        if let Some(first) = documents.first()
            && first.vector.len() != vector.len()
        {
            return Err(StorageError::Validation(format!(
                "query dimension {} does not match index dimension {}",
                vector.len(),
                first.vector.len()
            )));
        }

        let hits = documents
            .iter()
            .filter(|d| filter.is_none_or(|f| f.matches(&d.payload)))
            .map(|d| SearchHit {
                id: d.id.clone(),
                score: cosine_similarity(vector, &d.vector),
                payload: d.payload.clone(),
            })
            .collect();
        Ok(rank(hits, limit))
    }
}

#[async_trait]
impl KeywordSearch for InMemoryIndex {
    async fn search_text(
        &self,
        query: &str,
        filter: Option<&SearchFilter>,
        limit: usize,
    ) -> StorageResult<Vec<SearchHit>> {
        let query_terms: HashSet<String> = tokenize(query).into_iter().collect();
        let documents = self.documents.read().await;
        if query_terms.is_empty() || documents.is_empty() {
            return Ok(Vec::new());
        }

        let total = documents.len() as f32;
        let average_length =
            documents.iter().map(|d| d.length).sum::<usize>() as f32 / total;
        let idf: HashMap<&str, f32> = query_terms
            .iter()
            .map(|term| {
                let df = documents
                    .iter()
                    .filter(|d| d.term_counts.contains_key(term))
                    .count() as f32;
                (term.as_str(), ((total - df + 0.5) / (df + 0.5) + 1.0).ln())
            })
            .collect();

        let hits = documents
            .iter()
            .filter(|d| filter.is_none_or(|f| f.matches(&d.payload)))
            .filter_map(|d| {
                let norm = 1.0 - BM25_B + BM25_B * d.length as f32 / average_length.max(1.0);
                let score: f32 = query_terms
                    .iter()
                    .filter_map(|term| {
                        let tf = *d.term_counts.get(term)? as f32;
                        let weight = idf.get(term.as_str()).copied().unwrap_or_default();
                        Some(weight * tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * norm))
                    })
                    .sum();
                (score > 0.0).then(|| SearchHit {
                    id: d.id.clone(),
                    score,
                    payload: d.payload.clone(),
                })
            })
            .collect();
        Ok(rank(hits, limit))
    }
}
