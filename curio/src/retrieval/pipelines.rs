//! Scoring pipelines, one per [`RetrievalStrategy`].
//!
//! Every pipeline gathers candidates, scores them, sorts descending (ties
//! keep input order), truncates to `final_top_k` and explains each result.

use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::Result;
use crate::models::candidate::sort_by_score;
use crate::models::{RetrievalCandidate, RetrievalOutcome, RetrievalResult, RetrievalStrategy};
use crate::search::{compress_content, expand_query, merge_max, merge_weighted, metadata_filter};
use crate::storage::{SearchFilter, SearchHit};

use super::retriever::{AdvancedRetriever, Fetch, RetrievalRequest, gather_branches, sole_source};

/// Candidates per branch in hybrid search
const HYBRID_BRANCH_LIMIT: usize = 10;
/// Candidates per embedding source in multi-vector search
const MULTI_VECTOR_LIMIT: usize = 8;
/// Candidates per query variant in query expansion
const EXPANSION_LIMIT: usize = 5;
/// Candidates scored by temporal search
const TEMPORAL_POOL: usize = 20;
/// Candidates scored by compression, group-aware and resource-focused search
const WIDE_POOL: usize = 15;

/// Hierarchical stage weights, broad to narrow
const SUBJECT_STAGE_WEIGHT: f32 = 0.3;
const GRADE_STAGE_WEIGHT: f32 = 0.6;
const TOPIC_STAGE_WEIGHT: f32 = 1.0;
const GROUP_STAGE_WEIGHT: f32 = 1.2;

macro_rules! ready_or_return {
    ($fetch:expr) => {
        match $fetch? {
            Fetch::Ready(value) => value,
            Fetch::Failed(reason) => return Ok(RetrievalOutcome::upstream_failure(reason)),
        }
    };
}

impl AdvancedRetriever {
    /// Similarity search on the primary source with the subject/grade filter.
    async fn semantic_search(
        &self,
        request: &RetrievalRequest<'_>,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievalCandidate>> {
        self.primary.search(query, &request.filter(), limit).await
    }

    async fn keyword_search(
        &self,
        request: &RetrievalRequest<'_>,
        limit: usize,
    ) -> Result<Vec<RetrievalCandidate>> {
        let Some(keyword) = &self.keyword else {
            return Ok(Vec::new());
        };
        let hits = keyword
            .search_text(request.query, Some(&request.filter()), limit)
            .await?;
        Ok(hits.into_iter().map(SearchHit::into_candidate).collect())
    }

    /// Sort, truncate and explain candidates, annotating group relevance.
    fn finish(
        &self,
        request: &RetrievalRequest<'_>,
        method: RetrievalStrategy,
        mut candidates: Vec<RetrievalCandidate>,
        explain: impl Fn(&RetrievalCandidate) -> String,
    ) -> RetrievalOutcome {
        sort_by_score(&mut candidates);
        candidates.truncate(self.config.final_top_k);

        let annotator = self.annotator();
        let results = candidates
            .into_iter()
            .map(|candidate| {
                let explanation = explain(&candidate);
                let relevance =
                    annotator.assess_group_relevance(&candidate.content, request.group_context);
                RetrievalResult::from_candidate(candidate, method, explanation)
                    .with_group_relevance(relevance)
            })
            .collect();
        RetrievalOutcome::from_results(results)
    }

    /// One semantic search, scores unchanged.
    pub async fn basic(&self, request: &RetrievalRequest<'_>) -> Result<RetrievalOutcome> {
        let candidates = ready_or_return!(sole_source(
            self.semantic_search(request, request.query, self.config.final_top_k)
                .await
        ));

        Ok(self.finish(request, RetrievalStrategy::Basic, candidates, |_| {
            "Basic semantic search".to_string()
        }))
    }

    /// Semantic and keyword search merged with `hybrid_alpha`.
    pub async fn hybrid_search(&self, request: &RetrievalRequest<'_>) -> Result<RetrievalOutcome> {
        let (semantic, keyword) = tokio::join!(
            self.semantic_search(request, request.query, HYBRID_BRANCH_LIMIT),
            self.keyword_search(request, HYBRID_BRANCH_LIMIT),
        );
        let mut branches = vec![semantic];
        if self.keyword.is_some() {
            branches.push(keyword);
        }
        let mut sets = ready_or_return!(gather_branches(branches)).into_iter();
        let semantic = sets.next().unwrap_or_default();
        let keyword = sets.next().unwrap_or_default();
        tracing::debug!(
            "Hybrid search: {} semantic, {} keyword candidates",
            semantic.len(),
            keyword.len()
        );

        let alpha = self.config.hybrid_alpha;
        let merged = merge_weighted(vec![(semantic, alpha), (keyword, 1.0 - alpha)]);

        Ok(self.finish(request, RetrievalStrategy::HybridSearch, merged, |c| {
            format!("Combined semantic similarity ({:.3}) with keyword matching", c.score)
        }))
    }

    /// One search per embedding source, best score per document kept.
    pub async fn multi_vector(&self, request: &RetrievalRequest<'_>) -> Result<RetrievalOutcome> {
        let filter = request.filter();
        let sources = std::iter::once(&self.primary).chain(self.secondary.iter());
        let branches = join_all(
            sources.map(|source| source.search(request.query, &filter, MULTI_VECTOR_LIMIT)),
        )
        .await;

        let sets = ready_or_return!(gather_branches(branches));
        let answered = sets.iter().filter(|s| !s.is_empty()).count().max(1);
        let merged = merge_max(sets);

        Ok(self.finish(request, RetrievalStrategy::MultiVector, merged, |_| {
            format!("Multi-model consensus from {} embedding models", answered)
        }))
    }

    /// Search with paraphrased query variants.
    pub async fn query_expansion(&self, request: &RetrievalRequest<'_>) -> Result<RetrievalOutcome> {
        let variants = expand_query(
            &self.config,
            request.query,
            request.subject,
            request.grade,
            request.group_context,
        );
        tracing::debug!("Expanded query into {} variants", variants.len());

        let branches = join_all(
            variants
                .iter()
                .map(|variant| self.semantic_search(request, variant, EXPANSION_LIMIT)),
        )
        .await;
        let merged = merge_max(ready_or_return!(gather_branches(branches)));

        let count = variants.len();
        Ok(self.finish(request, RetrievalStrategy::QueryExpansion, merged, |_| {
            format!("Found via expanded query variations: {} queries", count)
        }))
    }

    /// Cross-encoder re-ranking of a wider candidate pool.
    ///
    /// Falls back to [`AdvancedRetriever::basic`] without a cross-encoder,
    /// without candidates, or when the cross-encoder fails.
    pub async fn reranking(&self, request: &RetrievalRequest<'_>) -> Result<RetrievalOutcome> {
        let Some(encoder) = &self.cross_encoder else {
            tracing::debug!("No cross-encoder configured, using basic retrieval");
            return self.basic(request).await;
        };

        let candidates = ready_or_return!(sole_source(
            self.semantic_search(request, request.query, self.config.rerank_top_k)
                .await
        ));
        if candidates.is_empty() {
            return self.basic(request).await;
        }

        let rerank_query = if request.has_group() {
            format!("{} for {}", request.query, request.group_context)
        } else {
            request.query.to_string()
        };
        let pairs: Vec<(String, String)> = candidates
            .iter()
            .map(|c| (rerank_query.clone(), c.content.clone()))
            .collect();

        let scores = match encoder.score_pairs(&pairs).await {
            Ok(scores) if scores.len() == candidates.len() => scores,
            Ok(scores) => {
                tracing::warn!(
                    "Cross-encoder {} returned {} scores for {} pairs, using basic retrieval",
                    encoder.name(),
                    scores.len(),
                    pairs.len()
                );
                return self.basic(request).await;
            }
            Err(e) => {
                tracing::warn!(
                    "Cross-encoder {} failed, using basic retrieval: {}",
                    encoder.name(),
                    e
                );
                return self.basic(request).await;
            }
        };

        let calculator = self.calculator();
        let reranked = candidates
            .into_iter()
            .zip(scores)
            .map(|(mut candidate, rerank)| {
                candidate.score = calculator.rerank_score(rerank, candidate.score);
                candidate
            })
            .collect();

        Ok(self.finish(request, RetrievalStrategy::Reranking, reranked, |c| {
            format!("Reranked using cross-encoder (score: {:.3})", c.score)
        }))
    }

    /// Subject, grade, topic and group stages with fixed weights.
    pub async fn hierarchical(&self, request: &RetrievalRequest<'_>) -> Result<RetrievalOutcome> {
        let mut stages = vec![
            (format!("{} curriculum standards", request.subject), 15, SUBJECT_STAGE_WEIGHT),
            (
                format!("{} {} learning objectives", request.subject, request.grade),
                10,
                GRADE_STAGE_WEIGHT,
            ),
            (request.query.to_string(), 8, TOPIC_STAGE_WEIGHT),
        ];
        if request.has_group() {
            stages.push((
                format!("{} {}", request.query, request.group_context),
                5,
                GROUP_STAGE_WEIGHT,
            ));
        }

        let branches = join_all(
            stages
                .iter()
                .map(|(query, limit, _)| self.semantic_search(request, query, *limit)),
        )
        .await;
        let sets = ready_or_return!(gather_branches(branches));

        let weighted: Vec<Vec<RetrievalCandidate>> = sets
            .into_iter()
            .zip(stages.iter().map(|(_, _, weight)| *weight))
            .map(|(set, weight)| set.into_iter().map(|c| c.scaled(weight)).collect())
            .collect();
        let merged = merge_max(weighted);

        Ok(self.finish(request, RetrievalStrategy::Hierarchical, merged, |_| {
            "Multi-stage hierarchical search (subject->grade->topic->student_group)".to_string()
        }))
    }

    /// Recency and source volatility boost.
    pub async fn temporal(
        &self,
        request: &RetrievalRequest<'_>,
        now: DateTime<Utc>,
    ) -> Result<RetrievalOutcome> {
        let candidates = ready_or_return!(sole_source(
            self.semantic_search(request, request.query, TEMPORAL_POOL)
                .await
        ));

        let calculator = self.calculator();
        let scored = candidates
            .into_iter()
            .map(|mut candidate| {
                let multiplier = calculator.temporal_multiplier(&candidate, now);
                candidate.score = calculator.temporal_score(candidate.score, multiplier);
                candidate
            })
            .collect();

        Ok(self.finish(request, RetrievalStrategy::Temporal, scored, |c| {
            format!(
                "Temporal-weighted search (recency boost: {:.2})",
                calculator.temporal_multiplier(c, now)
            )
        }))
    }

    /// One search filtered on subject, grade and the inferred domain.
    pub async fn metadata_filtered(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<RetrievalOutcome> {
        let filter: SearchFilter =
            metadata_filter(&self.config, request.query, request.subject, request.grade);
        let candidates = ready_or_return!(sole_source(
            self.primary
                .search(request.query, &filter, self.config.final_top_k)
                .await
        ));

        let conditions = filter.len();
        Ok(self.finish(request, RetrievalStrategy::MetadataFiltered, candidates, |_| {
            format!("Metadata-filtered search with {} filters", conditions)
        }))
    }

    /// Keep only the sentences relevant to the query and the group.
    pub async fn contextual_compression(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<RetrievalOutcome> {
        let candidates = ready_or_return!(sole_source(
            self.semantic_search(request, request.query, WIDE_POOL).await
        ));

        let initial = candidates.len();
        let compressed = candidates
            .into_iter()
            .filter_map(|mut candidate| {
                let content = compress_content(
                    &self.config,
                    request.query,
                    &candidate.content,
                    request.group_context,
                );
                if content.is_empty() {
                    return None;
                }
                candidate.content = content;
                Some(candidate)
            })
            .collect();

        Ok(self.finish(request, RetrievalStrategy::ContextualCompression, compressed, |_| {
            format!("Compressed from {} initial results", initial)
        }))
    }

    /// Boost content suited to the described student group.
    pub async fn student_group_aware(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<RetrievalOutcome> {
        let candidates = ready_or_return!(sole_source(
            self.semantic_search(request, request.query, WIDE_POOL).await
        ));

        let calculator = self.calculator();
        let boosted = candidates
            .into_iter()
            .map(|candidate| {
                let factor = calculator.group_multiplier(&candidate.content, request.group_context);
                candidate.scaled(factor)
            })
            .collect();

        Ok(self.finish(request, RetrievalStrategy::StudentGroupAware, boosted, |_| {
            format!("Student group optimized search for: {}", request.group_context)
        }))
    }

    /// Boost trusted external resources.
    ///
    /// Results carry their source as `external_resource_type` and are not
    /// annotated with group relevance.
    pub async fn external_resource_focused(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<RetrievalOutcome> {
        let candidates = ready_or_return!(sole_source(
            self.semantic_search(request, request.query, WIDE_POOL).await
        ));

        let calculator = self.calculator();
        let mut boosted: Vec<RetrievalCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let factor = calculator.external_resource_multiplier(&candidate);
                candidate.scaled(factor)
            })
            .collect();
        sort_by_score(&mut boosted);
        boosted.truncate(self.config.final_top_k);

        let results = boosted
            .into_iter()
            .map(|candidate| {
                let resource_type = candidate.source().unwrap_or("Unknown").to_string();
                let explanation =
                    format!("External resource prioritized search (type: {})", resource_type);
                RetrievalResult::from_candidate(
                    candidate,
                    RetrievalStrategy::ExternalResourceFocused,
                    explanation,
                )
                .with_external_resource_type(resource_type)
            })
            .collect();
        Ok(RetrievalOutcome::from_results(results))
    }
}
