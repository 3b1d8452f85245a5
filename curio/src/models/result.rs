//! Ranked retrieval output.

use serde::{Deserialize, Serialize};

use super::{Metadata, RetrievalCandidate, RetrievalStrategy};

/// A ranked, explained result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Document text, possibly compressed
    pub content: String,

    /// Payload fields carried over from the candidate
    pub metadata: Metadata,

    /// Final pipeline score
    pub score: f32,

    /// Strategy that produced the ranking
    pub retrieval_method: RetrievalStrategy,

    /// Which mechanism produced the score
    pub relevance_explanation: String,

    /// Student group labels from the relevance annotator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_group_relevance: Option<String>,

    /// Source tag, set by external-resource-focused retrieval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_resource_type: Option<String>,
}

impl RetrievalResult {
    /// Wrap a scored candidate.
    pub fn from_candidate(
        candidate: RetrievalCandidate,
        method: RetrievalStrategy,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            content: candidate.content,
            metadata: candidate.metadata,
            score: candidate.score,
            retrieval_method: method,
            relevance_explanation: explanation.into(),
            student_group_relevance: None,
            external_resource_type: None,
        }
    }

    /// Attach the annotator output.
    pub fn with_group_relevance(mut self, relevance: Option<String>) -> Self {
        self.student_group_relevance = relevance;
        self
    }

    /// Attach the external resource type.
    pub fn with_external_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.external_resource_type = Some(resource_type.into());
        self
    }
}

/// Why a request produced no results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum EmptyReason {
    /// The backends answered but nothing matched
    NoCandidates,
    /// A collaborator failed; the message describes the failure
    UpstreamFailure(String),
}

/// The outcome of one retrieval request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrievalOutcome {
    /// At least one result, sorted descending by score
    Found { results: Vec<RetrievalResult> },
    /// No results
    Empty { reason: EmptyReason },
}

impl RetrievalOutcome {
    /// Build an outcome from a result list; an empty list means no candidates.
    pub fn from_results(results: Vec<RetrievalResult>) -> Self {
        if results.is_empty() {
            RetrievalOutcome::Empty {
                reason: EmptyReason::NoCandidates,
            }
        } else {
            RetrievalOutcome::Found { results }
        }
    }

    /// Empty outcome caused by a failing collaborator.
    pub fn upstream_failure(message: impl Into<String>) -> Self {
        RetrievalOutcome::Empty {
            reason: EmptyReason::UpstreamFailure(message.into()),
        }
    }

    /// The results, empty when nothing was found.
    pub fn results(&self) -> &[RetrievalResult] {
        match self {
            RetrievalOutcome::Found { results } => results,
            RetrievalOutcome::Empty { .. } => &[],
        }
    }

    /// Consume the outcome, returning its results.
    pub fn into_results(self) -> Vec<RetrievalResult> {
        match self {
            RetrievalOutcome::Found { results } => results,
            RetrievalOutcome::Empty { .. } => Vec::new(),
        }
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results().len()
    }

    /// Whether no results were found.
    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    /// The reason for an empty outcome.
    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            RetrievalOutcome::Found { .. } => None,
            RetrievalOutcome::Empty { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(content: &str, score: f32) -> RetrievalResult {
        RetrievalResult::from_candidate(
            RetrievalCandidate::new(content, score),
            RetrievalStrategy::Basic,
            "Basic semantic search",
        )
    }

    #[test]
    fn test_outcome_from_empty_list_reports_no_candidates() {
        let outcome = RetrievalOutcome::from_results(Vec::new());
        assert!(outcome.is_empty());
        assert_eq!(outcome.empty_reason(), Some(&EmptyReason::NoCandidates));
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = RetrievalOutcome::from_results(vec![result("a", 0.9), result("b", 0.4)]);
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.empty_reason(), None);
        assert_eq!(outcome.into_results()[1].content, "b");

        let failed = RetrievalOutcome::upstream_failure("index timed out");
        assert!(failed.results().is_empty());
        assert_eq!(
            failed.empty_reason(),
            Some(&EmptyReason::UpstreamFailure("index timed out".to_string()))
        );
    }

    #[test]
    fn test_result_serializes_method_tag() {
        let value = serde_json::to_value(
            result("Add fractions", 0.5).with_group_relevance(Some("Advanced content".into())),
        )
        .unwrap();
        assert_eq!(value["retrieval_method"], "basic");
        assert_eq!(value["student_group_relevance"], "Advanced content");
        assert!(value.get("external_resource_type").is_none());
    }
}
