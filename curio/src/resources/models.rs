//! Resource request and record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::StandardRecord;
use crate::storage::Document;

/// What a provider is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub subject: String,
    pub grade: String,
    pub topic: String,
}

impl ResourceRequest {
    pub fn new(subject: impl Into<String>, grade: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.into(),
            topic: topic.into(),
        }
    }
}

/// A structured external resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub title: String,

    pub description: String,

    #[serde(default, alias = "url")]
    pub resource_url: String,

    /// Kind of resource, e.g. "video", "article", "NGSS Standard"
    #[serde(rename = "type", default)]
    pub resource_type: String,

    /// Source tag, e.g. "YouTube", "Wikipedia", "NGSS"
    pub source: String,

    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
}

impl ResourceRecord {
    /// Create a record fetched now.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            resource_url: String::new(),
            resource_type: String::new(),
            source: source.into(),
            fetched_at: Utc::now(),
            domain: None,
            cluster: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.resource_url = url.into();
        self
    }

    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn fetched_at(mut self, at: DateTime<Utc>) -> Self {
        self.fetched_at = at;
        self
    }

    /// Identifier used for standard records: `"{source}_{title}"`.
    pub fn standard_id(&self) -> String {
        format!("{}_{}", self.source, self.title)
    }

    /// Turn the record into an indexable document.
    ///
    /// The description becomes the text, or the title when the description
    /// is blank; the fetch time is stored as `cached_at` so temporal search
    /// can age it.
    pub fn into_document(self, subject: &str, grade: &str) -> Document {
        let text = if self.description.trim().is_empty() {
            self.title.clone()
        } else {
            self.description.clone()
        };
        let mut document = Document::new(text)
            .with_field("standard_id", self.standard_id())
            .with_field("subject", subject)
            .with_field("grade", grade)
            .with_field("source", self.source)
            .with_field("type", self.resource_type)
            .with_field("resource_url", self.resource_url)
            .with_field("resource_title", self.title)
            .with_field("cached_at", self.fetched_at.to_rfc3339());
        if let Some(domain) = self.domain {
            document = document.with_field("domain", domain);
        }
        if let Some(cluster) = self.cluster {
            document = document.with_field("cluster", cluster);
        }
        document
    }

    /// Format the record for the lesson-plan agent.
    pub fn into_standard(self, subject: &str, grade: &str) -> StandardRecord {
        StandardRecord {
            standard_id: self.standard_id(),
            description: self.description,
            subject: subject.to_string(),
            grade: grade.to_string(),
            source: self.source,
            resource_url: self.resource_url,
            resource_title: self.title,
            resource_type: self.resource_type,
            score: None,
            domain: self.domain.unwrap_or_default(),
            cluster: self.cluster.unwrap_or_default(),
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

    fn record() -> ResourceRecord {
        ResourceRecord::new(
            "Photosynthesis",
            "How plants turn light into sugar.",
            "Wikipedia",
        )
        .with_url("https://en.wikipedia.org/wiki/Photosynthesis")
        .with_type("article")
        .with_domain("Life Sciences")
    }

    #[test]
    fn test_into_document() {
        let document = record().into_document("Science", "5");
        assert_eq!(document.text, "How plants turn light into sugar.");
        assert_eq!(document.fields["standard_id"], "Wikipedia_Photosynthesis");
        assert_eq!(document.fields["source"], "Wikipedia");
        assert_eq!(document.fields["type"], "article");
        assert_eq!(document.fields["resource_title"], "Photosynthesis");
        assert_eq!(document.fields["domain"], "Life Sciences");
        assert!(document.fields.get("cluster").is_none());
        assert!(document.fields["cached_at"].is_string());
    }

    #[test]
    fn test_into_standard() {
        let standard = record().into_standard("Science", "5");
        assert_eq!(standard.standard_id, "Wikipedia_Photosynthesis");
        assert_eq!(standard.resource_type, "article");
        assert_eq!(standard.domain, "Life Sciences");
        assert_eq!(standard.cluster, "");
        assert_eq!(standard.score, None);
    }

    #[test]
    fn test_deserialize_accepts_url_alias() {
        let json = r#"{
            "title": "MS-PS1-1",
            "description": "Develop models of simple molecules.",
            "url": "https://www.nextgenscience.org/pe/ms-ps1-1",
            "type": "NGSS Standard",
            "source": "NGSS"
        }"#;
        let record: ResourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.resource_url, "https://www.nextgenscience.org/pe/ms-ps1-1");
        assert_eq!(record.resource_type, "NGSS Standard");
        assert_eq!(record.domain, None);
    }

    #[test]
    fn test_into_document_uses_title_without_description() {
        let document = ResourceRecord::new("Equivalent fractions song", "", "YouTube")
            .with_type("video")
            .into_document("Mathematics", "4");
        assert_eq!(document.text, "Equivalent fractions song");
        assert_eq!(document.fields["standard_id"], "YouTube_Equivalent fractions song");

        let document = ResourceRecord::new("", "  ", "YouTube").into_document("Mathematics", "4");
        assert!(document.text.is_empty());
    }
}
