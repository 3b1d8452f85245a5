//! Agent-facing standard records.

use serde::{Deserialize, Serialize};

use super::{Metadata, RetrievalResult};

/// A curriculum standard or resource in the shape the lesson-plan agent
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardRecord {
    pub standard_id: String,
    pub description: String,
    pub subject: String,
    pub grade: String,
    pub source: String,
    pub resource_url: String,
    pub resource_title: String,
    pub resource_type: String,
    pub score: Option<f32>,
    pub domain: String,
    pub cluster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_group_relevance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_resource_type: Option<String>,
}

fn field(metadata: &Metadata, key: &str) -> Option<String> {
    metadata
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn field_or(metadata: &Metadata, key: &str, default: &str) -> String {
    field(metadata, key).unwrap_or_else(|| default.to_string())
}

impl StandardRecord {
    /// Format a ranked result for the request's subject and grade.
    pub fn from_result(result: RetrievalResult, subject: &str, grade: &str) -> Self {
        let metadata = &result.metadata;
        let method = result.retrieval_method.as_str();

        Self {
            standard_id: field(metadata, "standard_id")
                .unwrap_or_else(|| format!("advanced_{}", method)),
            subject: subject.to_string(),
            grade: grade.to_string(),
            source: field_or(metadata, "source", "Advanced Retrieval"),
            resource_url: field_or(metadata, "resource_url", ""),
            resource_title: field_or(metadata, "resource_title", ""),
            resource_type: field_or(metadata, "type", "standard"),
            score: Some(result.score),
            domain: field_or(metadata, "domain", ""),
            cluster: field_or(metadata, "cluster", ""),
            retrieval_method: Some(method.to_string()),
            relevance_explanation: Some(result.relevance_explanation),
            student_group_relevance: result.student_group_relevance,
            external_resource_type: result.external_resource_type,
            description: result.content,
        }
    }

    /// Format an indexed document found by plain similarity search.
    pub fn from_indexed(
        id: &str,
        content: String,
        metadata: &Metadata,
        score: f32,
        subject: &str,
        grade: &str,
    ) -> Self {
        Self {
            standard_id: field(metadata, "standard_id").unwrap_or_else(|| format!("indexed_{}", id)),
            description: content,
            subject: subject.to_string(),
            grade: grade.to_string(),
            source: field_or(metadata, "source", "Index"),
            resource_url: String::new(),
            resource_title: field_or(metadata, "resource_title", "Standards Database"),
            resource_type: field_or(metadata, "type", "standard"),
            score: Some(score),
            domain: field_or(metadata, "domain", ""),
            cluster: field_or(metadata, "cluster", ""),
            retrieval_method: None,
            relevance_explanation: None,
            student_group_relevance: None,
            external_resource_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RetrievalCandidate, RetrievalStrategy};

    #[test]
    fn test_from_result_applies_defaults() {
        let result = RetrievalResult::from_candidate(
            RetrievalCandidate::new("Compare fractions", 0.8),
            RetrievalStrategy::Hierarchical,
            "Hierarchical retrieval",
        );
        let record = StandardRecord::from_result(result, "Mathematics", "4");

        assert_eq!(record.standard_id, "advanced_hierarchical");
        assert_eq!(record.source, "Advanced Retrieval");
        assert_eq!(record.resource_type, "standard");
        assert_eq!(record.resource_url, "");
        assert_eq!(record.description, "Compare fractions");
        assert_eq!(record.retrieval_method.as_deref(), Some("hierarchical"));
        assert_eq!(record.score, Some(0.8));
    }

    #[test]
    fn test_from_result_keeps_metadata_fields() {
        let candidate = RetrievalCandidate::new("Photosynthesis video", 0.6)
            .field("standard_id", "NGSS.5-LS1-1")
            .field("source", "YouTube")
            .field("type", "video")
            .field("resource_url", "https://youtube.com/watch?v=abc");
        let result = RetrievalResult::from_candidate(
            candidate,
            RetrievalStrategy::ExternalResourceFocused,
            "External resource focused",
        )
        .with_external_resource_type("YouTube");

        let record = StandardRecord::from_result(result, "Science", "5");
        assert_eq!(record.standard_id, "NGSS.5-LS1-1");
        assert_eq!(record.source, "YouTube");
        assert_eq!(record.resource_type, "video");
        assert_eq!(record.external_resource_type.as_deref(), Some("YouTube"));
    }
}
