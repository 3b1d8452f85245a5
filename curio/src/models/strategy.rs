//! Retrieval strategy identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One of the eleven scoring pipelines.
///
/// Tags are the snake_case variant names. Parsing never fails: an
/// unrecognized tag selects [`RetrievalStrategy::Basic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    /// Single similarity query, scores unchanged
    #[default]
    Basic,
    /// Weighted semantic + keyword merge
    HybridSearch,
    /// One query per embedding source, max-merged
    MultiVector,
    /// Paraphrased query variants, max-merged
    QueryExpansion,
    /// Cross-encoder re-scoring of a wider pool
    Reranking,
    /// Subject, grade, topic and group stages with fixed weights
    Hierarchical,
    /// Recency and source-volatility boost
    Temporal,
    /// Subject, grade and inferred-domain filter
    MetadataFiltered,
    /// Query-relevant sentence extraction
    ContextualCompression,
    /// Boost for content matching the student group
    StudentGroupAware,
    /// Boost for trusted external resources
    ExternalResourceFocused,
}

impl RetrievalStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [RetrievalStrategy; 11] = [
        RetrievalStrategy::Basic,
        RetrievalStrategy::HybridSearch,
        RetrievalStrategy::MultiVector,
        RetrievalStrategy::QueryExpansion,
        RetrievalStrategy::Reranking,
        RetrievalStrategy::Hierarchical,
        RetrievalStrategy::Temporal,
        RetrievalStrategy::MetadataFiltered,
        RetrievalStrategy::ContextualCompression,
        RetrievalStrategy::StudentGroupAware,
        RetrievalStrategy::ExternalResourceFocused,
    ];

    /// The snake_case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalStrategy::Basic => "basic",
            RetrievalStrategy::HybridSearch => "hybrid_search",
            RetrievalStrategy::MultiVector => "multi_vector",
            RetrievalStrategy::QueryExpansion => "query_expansion",
            RetrievalStrategy::Reranking => "reranking",
            RetrievalStrategy::Hierarchical => "hierarchical",
            RetrievalStrategy::Temporal => "temporal",
            RetrievalStrategy::MetadataFiltered => "metadata_filtered",
            RetrievalStrategy::ContextualCompression => "contextual_compression",
            RetrievalStrategy::StudentGroupAware => "student_group_aware",
            RetrievalStrategy::ExternalResourceFocused => "external_resource_focused",
        }
    }

    /// Look up a tag exactly, without the `Basic` fallback.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == tag)
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            RetrievalStrategy::Basic => "single similarity search, scores unchanged",
            RetrievalStrategy::HybridSearch => "semantic and keyword search, weighted merge",
            RetrievalStrategy::MultiVector => "one search per embedding model, best score kept",
            RetrievalStrategy::QueryExpansion => "paraphrased query variants, best score kept",
            RetrievalStrategy::Reranking => "cross-encoder re-scoring of a wider candidate pool",
            RetrievalStrategy::Hierarchical => "subject, grade, topic and group stages",
            RetrievalStrategy::Temporal => "recency and source volatility boost",
            RetrievalStrategy::MetadataFiltered => "subject, grade and inferred domain filter",
            RetrievalStrategy::ContextualCompression => "query-relevant sentences only",
            RetrievalStrategy::StudentGroupAware => "boost content suited to the student group",
            RetrievalStrategy::ExternalResourceFocused => "boost trusted external resources",
        }
    }
}

impl fmt::Display for RetrievalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RetrievalStrategy {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }
}

impl FromStr for RetrievalStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl<'de> Deserialize<'de> for RetrievalStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag.as_str()))
    }
}
