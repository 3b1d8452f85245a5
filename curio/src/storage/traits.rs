//! Trait definitions for search backends

use async_trait::async_trait;

use crate::storage::errors::StorageResult;
use crate::storage::filters::SearchFilter;
use crate::storage::models::SearchHit;

/// Vector similarity search over an indexed collection.
#[async_trait]
pub trait SimilarityService: Send + Sync + 'static {
    /// Return up to `limit` hits ranked by similarity to `vector`, keeping
    /// only payloads that satisfy `filter`.
    async fn search(
        &self,
        vector: &[f32],
        filter: Option<&SearchFilter>,
        limit: usize,
    ) -> StorageResult<Vec<SearchHit>>;
}

/// Lexical search over an indexed collection.
#[async_trait]
pub trait KeywordSearch: Send + Sync + 'static {
    /// Return up to `limit` hits ranked by term relevance to `query`.
    async fn search_text(
        &self,
        query: &str,
        filter: Option<&SearchFilter>,
        limit: usize,
    ) -> StorageResult<Vec<SearchHit>>;
}
