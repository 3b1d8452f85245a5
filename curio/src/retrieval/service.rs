//! Retrieval service for the lesson-plan agent

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{EmptyReason, RetrievalOutcome, RetrievalStrategy, StandardRecord};
use crate::resources::ResourceAggregator;

use super::retriever::AdvancedRetriever;

/// Strategy used when the caller does not pick one
pub const DEFAULT_STRATEGY: RetrievalStrategy = RetrievalStrategy::HybridSearch;

/// Formats retrieval results as standard records and recovers from
/// failing strategies.
pub struct RetrievalService {
    retriever: Arc<AdvancedRetriever>,
    resources: Option<Arc<ResourceAggregator>>,
}

impl RetrievalService {
    pub fn new(retriever: Arc<AdvancedRetriever>) -> Self {
        Self {
            retriever,
            resources: None,
        }
    }

    /// Attach external resource providers used by baseline retrieval.
    pub fn with_resources(mut self, resources: Arc<ResourceAggregator>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn retriever(&self) -> &AdvancedRetriever {
        &self.retriever
    }

    /// Retrieve standards with the given strategy, hybrid search by default.
    ///
    /// When the strategy errors or reports an upstream failure, the
    /// baseline path runs instead. Never fails; the list may be empty.
    pub async fn retrieve_standards(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
        strategy: Option<RetrievalStrategy>,
        group_context: &str,
    ) -> Vec<StandardRecord> {
        let strategy = strategy.unwrap_or(DEFAULT_STRATEGY);
        let outcome = self
            .retriever
            .advanced_retrieve(query, subject, grade, strategy, group_context)
            .await;

        match outcome {
            Ok(RetrievalOutcome::Empty {
                reason: EmptyReason::UpstreamFailure(reason),
            }) => {
                tracing::warn!(
                    "{} retrieval hit an upstream failure ({}), falling back to baseline retrieval",
                    strategy,
                    reason
                );
                self.baseline(query, subject, grade).await
            }
            Ok(outcome) => outcome
                .into_results()
                .into_iter()
                .map(|result| StandardRecord::from_result(result, subject, grade))
                .collect(),
            Err(e) => {
                tracing::warn!(
                    "{} retrieval failed: {}, falling back to baseline retrieval",
                    strategy,
                    e
                );
                self.baseline(query, subject, grade).await
            }
        }
    }

    /// Plain similarity search followed by external resources, truncated
    /// to `final_top_k`. Failures in either half are logged and skipped.
    pub async fn baseline(&self, query: &str, subject: &str, grade: &str) -> Vec<StandardRecord> {
        let limit = self.retriever.config().final_top_k;
        let mut records = Vec::new();

        match self.retriever.similarity_hits(query, subject, grade, limit).await {
            Ok(hits) => records.extend(hits.into_iter().map(|hit| {
                let content = hit.text().to_string();
                let mut payload = hit.payload;
                payload.remove(crate::storage::models::TEXT_FIELD);
                StandardRecord::from_indexed(&hit.id, content, &payload, hit.score, subject, grade)
            })),
            Err(e) => tracing::warn!("Baseline similarity search failed: {}", e),
        }

        if let Some(resources) = &self.resources {
            let fetched = resources.fetch_all(subject, grade, query).await;
            records.extend(fetched.into_iter().map(|r| r.into_standard(subject, grade)));
        }

        records.truncate(limit);
        records
    }

    /// Run every strategy and collect the outcomes.
    pub async fn compare_strategies(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
        group_context: &str,
    ) -> BTreeMap<RetrievalStrategy, RetrievalOutcome> {
        self.retriever
            .compare_strategies(query, subject, grade, group_context)
            .await
    }
}
