//! Cross-encoder interface for re-ranking.

use async_trait::async_trait;

use super::error::Result;
use super::tokenizer::term_set;

/// Scores `(query, document)` pairs jointly.
///
/// Implementations return one score per pair, in input order. Higher means
/// more relevant; the scale is model-specific.
#[async_trait]
pub trait CrossEncoder: Send + Sync + 'static {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Score each pair
    async fn score_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<f32>>;
}

/// Fraction of distinct query words that occur in the document.
///
/// Scores lie in `[0, 1]`; an empty query scores zero.
#[derive(Debug, Clone, Default)]
pub struct TermOverlapCrossEncoder;

impl TermOverlapCrossEncoder {
    pub fn new() -> Self {
        Self
    }

    fn score(query: &str, document: &str) -> f32 {
        let query_terms = term_set(query);
        if query_terms.is_empty() {
            return 0.0;
        }
        let document_terms = term_set(document);
        let shared = query_terms
            .iter()
            .filter(|t| document_terms.contains(*t))
            .count();
        shared as f32 / query_terms.len() as f32
    }
}

#[async_trait]
impl CrossEncoder for TermOverlapCrossEncoder {
    fn name(&self) -> &str {
        "term-overlap"
    }

    async fn score_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<f32>> {
        Ok(pairs
            .iter()
            .map(|(query, document)| Self::score(query, document))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scores_follow_input_order() {
        let encoder = TermOverlapCrossEncoder::new();
        let pairs = vec![
            ("area of rectangles".to_string(), "Find the area of rectangles".to_string()),
            ("area of rectangles".to_string(), "Photosynthesis in plants".to_string()),
            ("".to_string(), "anything".to_string()),
        ];

        let scores = encoder.score_pairs(&pairs).await.unwrap();
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 1.0).abs() < 1e-6);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[tokio::test]
    async fn test_partial_overlap() {
        let encoder = TermOverlapCrossEncoder::new();
        let pairs = vec![(
            "fractions for ESL students".to_string(),
            "Adding fractions with visual models".to_string(),
        )];

        let scores = encoder.score_pairs(&pairs).await.unwrap();
        assert!((scores[0] - 0.25).abs() < 1e-6);
    }
}
