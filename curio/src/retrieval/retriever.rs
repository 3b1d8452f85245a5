//! The strategy dispatcher

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::ml::{CrossEncoder, Embedder};
use crate::models::{RetrievalCandidate, RetrievalOutcome, RetrievalStrategy};
use crate::search::{RelevanceAnnotator, ScoreCalculator};
use crate::storage::{KeywordSearch, SearchFilter, SearchHit, SimilarityService};
use crate::{CurioError, Result};

/// An embedder paired with the index holding vectors from that embedder.
#[derive(Clone)]
pub struct EmbeddingSource {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityService>,
}

impl EmbeddingSource {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn SimilarityService>) -> Self {
        Self { embedder, index }
    }

    /// Name of the embedder
    pub fn name(&self) -> &str {
        self.embedder.name()
    }

    /// Embed `query` and return the raw hits.
    pub async fn search_hits(
        &self,
        query: &str,
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let vector = self.embedder.embed(query).await?;
        Ok(self.index.search(&vector, Some(filter), limit).await?)
    }

    /// Embed `query` and return candidates.
    pub async fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<RetrievalCandidate>> {
        let hits = self.search_hits(query, filter, limit).await?;
        Ok(hits.into_iter().map(SearchHit::into_candidate).collect())
    }
}

/// One retrieval request.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalRequest<'a> {
    /// Teacher's query text
    pub query: &'a str,
    pub subject: &'a str,
    pub grade: &'a str,
    /// Free-text student group description; may be empty
    pub group_context: &'a str,
}

impl<'a> RetrievalRequest<'a> {
    pub fn new(query: &'a str, subject: &'a str, grade: &'a str, group_context: &'a str) -> Self {
        Self {
            query,
            subject,
            grade,
            group_context,
        }
    }

    /// Whether a student group was described
    pub fn has_group(&self) -> bool {
        !self.group_context.trim().is_empty()
    }

    /// The subject and grade filter
    pub fn filter(&self) -> SearchFilter {
        SearchFilter::subject_grade(self.subject, self.grade)
    }
}

/// Candidates gathered for a pipeline, or the reason there are none.
pub(crate) enum Fetch<T> {
    Ready(T),
    Failed(String),
}

/// Classify the result of a pipeline's only candidate source.
///
/// An unreachable backend propagates; any other failure becomes
/// [`Fetch::Failed`].
pub(crate) fn sole_source(
    result: Result<Vec<RetrievalCandidate>>,
) -> Result<Fetch<Vec<RetrievalCandidate>>> {
    match result {
        Ok(candidates) => Ok(Fetch::Ready(candidates)),
        Err(e) if e.is_unavailable() => Err(e),
        Err(e) => {
            tracing::warn!("Candidate search failed: {}", e);
            Ok(Fetch::Failed(e.to_string()))
        }
    }
}

/// Combine the branches of a multi-source pipeline.
///
/// Failed branches are logged and replaced by empty sets, keeping branch
/// positions. Only when every branch failed is the pipeline failed, and an
/// unreachable backend among them propagates.
pub(crate) fn gather_branches(
    branches: Vec<Result<Vec<RetrievalCandidate>>>,
) -> Result<Fetch<Vec<Vec<RetrievalCandidate>>>> {
    let total = branches.len();
    let mut sets = Vec::with_capacity(total);
    let mut failures: Vec<CurioError> = Vec::new();

    for branch in branches {
        match branch {
            Ok(candidates) => sets.push(candidates),
            Err(e) => {
                tracing::warn!("Retrieval branch failed: {}", e);
                failures.push(e);
                sets.push(Vec::new());
            }
        }
    }

    if total > 0 && failures.len() == total {
        if let Some(position) = failures.iter().position(CurioError::is_unavailable) {
            return Err(failures.swap_remove(position));
        }
        let reasons: Vec<String> = failures.iter().map(ToString::to_string).collect();
        return Ok(Fetch::Failed(reasons.join("; ")));
    }
    Ok(Fetch::Ready(sets))
}

/// Multi-strategy retriever.
///
/// Built once with its collaborators and configuration, then shared; every
/// method takes `&self`.
pub struct AdvancedRetriever {
    pub(crate) primary: EmbeddingSource,
    pub(crate) secondary: Vec<EmbeddingSource>,
    pub(crate) keyword: Option<Arc<dyn KeywordSearch>>,
    pub(crate) cross_encoder: Option<Arc<dyn CrossEncoder>>,
    pub(crate) config: RetrievalConfig,
}

impl AdvancedRetriever {
    /// Start building a retriever around the primary embedder and its index.
    pub fn builder(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityService>,
    ) -> AdvancedRetrieverBuilder {
        AdvancedRetrieverBuilder::new(EmbeddingSource::new(embedder, index))
    }

    /// The retrieval configuration
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Whether a cross-encoder is available for re-ranking
    pub fn has_cross_encoder(&self) -> bool {
        self.cross_encoder.is_some()
    }

    /// Whether a keyword backend is available for hybrid search
    pub fn has_keyword_search(&self) -> bool {
        self.keyword.is_some()
    }

    /// Number of embedding sources, the primary included
    pub fn embedding_sources(&self) -> usize {
        1 + self.secondary.len()
    }

    pub(crate) fn annotator(&self) -> RelevanceAnnotator<'_> {
        RelevanceAnnotator::new(&self.config.group_profiles)
    }

    pub(crate) fn calculator(&self) -> ScoreCalculator<'_> {
        ScoreCalculator::new(&self.config)
    }

    /// Run one strategy.
    ///
    /// `strategy` accepts a [`RetrievalStrategy`] or a tag; unknown tags
    /// run [`RetrievalStrategy::Basic`]. Collaborator failures are
    /// reported as [`RetrievalOutcome::Empty`] where the pipeline can
    /// recover, and as `Err` when its only backend is unreachable.
    pub async fn advanced_retrieve(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
        strategy: impl Into<RetrievalStrategy>,
        group_context: &str,
    ) -> Result<RetrievalOutcome> {
        let request = RetrievalRequest::new(query, subject, grade, group_context);
        self.retrieve_at(&request, strategy.into(), Utc::now()).await
    }

    /// Run one strategy with an explicit clock for temporal scoring.
    pub async fn retrieve_at(
        &self,
        request: &RetrievalRequest<'_>,
        strategy: RetrievalStrategy,
        now: DateTime<Utc>,
    ) -> Result<RetrievalOutcome> {
        tracing::debug!(
            "Running {} retrieval for '{}' ({} {})",
            strategy,
            request.query,
            request.subject,
            request.grade
        );

        let outcome = match strategy {
            RetrievalStrategy::Basic => self.basic(request).await,
            RetrievalStrategy::HybridSearch => self.hybrid_search(request).await,
            RetrievalStrategy::MultiVector => self.multi_vector(request).await,
            RetrievalStrategy::QueryExpansion => self.query_expansion(request).await,
            RetrievalStrategy::Reranking => self.reranking(request).await,
            RetrievalStrategy::Hierarchical => self.hierarchical(request).await,
            RetrievalStrategy::Temporal => self.temporal(request, now).await,
            RetrievalStrategy::MetadataFiltered => self.metadata_filtered(request).await,
            RetrievalStrategy::ContextualCompression => {
                self.contextual_compression(request).await
            }
            RetrievalStrategy::StudentGroupAware => self.student_group_aware(request).await,
            RetrievalStrategy::ExternalResourceFocused => {
                self.external_resource_focused(request).await
            }
        }?;

        tracing::debug!("{} retrieval returned {} results", strategy, outcome.len());
        Ok(outcome)
    }

    /// Run every strategy on the same request.
    ///
    /// A strategy that fails outright is reported as
    /// `Empty { UpstreamFailure }` instead of aborting the comparison.
    pub async fn compare_strategies(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
        group_context: &str,
    ) -> BTreeMap<RetrievalStrategy, RetrievalOutcome> {
        let request = RetrievalRequest::new(query, subject, grade, group_context);
        let now = Utc::now();
        let runs = join_all(
            RetrievalStrategy::ALL
                .iter()
                .map(|&strategy| async move { (strategy, self.retrieve_at(&request, strategy, now).await) }),
        )
        .await;

        runs.into_iter()
            .map(|(strategy, result)| {
                let outcome = result.unwrap_or_else(|e| {
                    tracing::warn!("{} retrieval failed: {}", strategy, e);
                    RetrievalOutcome::upstream_failure(e.to_string())
                });
                (strategy, outcome)
            })
            .collect()
    }

    /// Plain similarity search against the primary index, with hit ids.
    pub async fn similarity_hits(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let filter = SearchFilter::subject_grade(subject, grade);
        self.primary.search_hits(query, &filter, limit).await
    }
}

/// Builder for [`AdvancedRetriever`].
pub struct AdvancedRetrieverBuilder {
    primary: EmbeddingSource,
    secondary: Vec<EmbeddingSource>,
    keyword: Option<Arc<dyn KeywordSearch>>,
    cross_encoder: Option<Arc<dyn CrossEncoder>>,
    config: RetrievalConfig,
}

impl AdvancedRetrieverBuilder {
    pub fn new(primary: EmbeddingSource) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
            keyword: None,
            cross_encoder: None,
            config: RetrievalConfig::default(),
        }
    }

    /// Add another embedder with its own index for multi-vector search.
    pub fn secondary_source(
        mut self,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityService>,
    ) -> Self {
        self.secondary.push(EmbeddingSource::new(embedder, index));
        self
    }

    /// Keyword backend for hybrid search
    pub fn keyword_search(mut self, keyword: Arc<dyn KeywordSearch>) -> Self {
        self.keyword = Some(keyword);
        self
    }

    /// Cross-encoder for re-ranking
    pub fn cross_encoder(mut self, encoder: Arc<dyn CrossEncoder>) -> Self {
        self.cross_encoder = Some(encoder);
        self
    }

    /// Retrieval configuration; defaults to [`RetrievalConfig::default`].
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> AdvancedRetriever {
        tracing::debug!(
            "Building retriever: {} embedding sources, keyword search: {}, cross-encoder: {}",
            1 + self.secondary.len(),
            self.keyword.is_some(),
            self.cross_encoder.is_some()
        );
        AdvancedRetriever {
            primary: self.primary,
            secondary: self.secondary,
            keyword: self.keyword,
            cross_encoder: self.cross_encoder,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn candidates(n: usize) -> Vec<RetrievalCandidate> {
        (0..n)
            .map(|i| RetrievalCandidate::new(format!("doc {}", i), 0.5))
            .collect()
    }

    #[test]
    fn test_sole_source_classification() {
        assert!(matches!(sole_source(Ok(candidates(2))), Ok(Fetch::Ready(c)) if c.len() == 2));

        let failed = sole_source(Err(StorageError::Query("bad".into()).into()));
        assert!(matches!(failed, Ok(Fetch::Failed(_))));

        let down = sole_source(Err(StorageError::Unavailable("down".into()).into()));
        assert!(matches!(down, Err(e) if e.is_unavailable()));
    }

    #[test]
    fn test_gather_isolates_failed_branches() {
        let gathered = gather_branches(vec![
            Err(StorageError::Unavailable("secondary down".into()).into()),
            Ok(candidates(3)),
        ]);
        match gathered {
            Ok(Fetch::Ready(sets)) => {
                assert_eq!(sets.len(), 2);
                assert!(sets[0].is_empty());
                assert_eq!(sets[1].len(), 3);
            }
            _ => panic!("expected ready branches"),
        }
    }

    #[test]
    fn test_gather_all_failed() {
        let gathered = gather_branches(vec![
            Err(StorageError::Query("a".into()).into()),
            Err(StorageError::Timeout("b".into()).into()),
        ]);
        assert!(matches!(gathered, Ok(Fetch::Failed(reason)) if reason.contains("Timeout")));

        let gathered = gather_branches(vec![
            Err(StorageError::Query("a".into()).into()),
            Err(StorageError::Unavailable("b".into()).into()),
        ]);
        assert!(matches!(gathered, Err(e) if e.is_unavailable()));

        assert!(matches!(gather_branches(Vec::new()), Ok(Fetch::Ready(sets)) if sets.is_empty()));
    }
}
