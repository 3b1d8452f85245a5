//! Payload filters for similarity and keyword queries

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Metadata;

/// A single exact-match condition on a payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    /// Payload field name
    pub field: String,

    /// Required value
    pub value: String,
}

impl FieldCondition {
    /// Whether the payload satisfies the condition.
    ///
    /// Strings compare exactly; numbers and booleans compare by their JSON
    /// rendering, so `"5"` matches both `"5"` and `5`.
    pub fn matches(&self, payload: &Metadata) -> bool {
        match payload.get(&self.field) {
            Some(Value::String(s)) => *s == self.value,
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string() == self.value,
            _ => false,
        }
    }
}

/// Conjunction of field conditions; every condition must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Conditions that must all match
    pub must: Vec<FieldCondition>,
}

impl SearchFilter {
    /// An empty filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. Blank values are ignored.
    pub fn must(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.must.push(FieldCondition {
                field: field.into(),
                value,
            });
        }
        self
    }

    /// The subject and grade filter applied by semantic search.
    pub fn subject_grade(subject: &str, grade: &str) -> Self {
        Self::new().must("subject", subject).must("grade", grade)
    }

    /// Number of conditions
    pub fn len(&self) -> usize {
        self.must.len()
    }

    /// Whether the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
    }

    /// Whether the payload satisfies every condition.
    pub fn matches(&self, payload: &Metadata) -> bool {
        self.must.iter().all(|c| c.matches(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Metadata {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_subject_grade_filter() {
        let filter = SearchFilter::subject_grade("Mathematics", "5");
        assert_eq!(filter.len(), 2);

        assert!(filter.matches(&payload(json!({"subject": "Mathematics", "grade": "5"}))));
        assert!(filter.matches(&payload(json!({"subject": "Mathematics", "grade": 5}))));
        assert!(!filter.matches(&payload(json!({"subject": "Science", "grade": "5"}))));
        assert!(!filter.matches(&payload(json!({"subject": "Mathematics"}))));
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let filter = SearchFilter::subject_grade("Mathematics", "");
        assert_eq!(filter.len(), 1);
        assert!(SearchFilter::new().matches(&Metadata::new()));
    }
}
