//! Error types for embedding and cross-encoder calls

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MLError {
    /// The embedder could not produce a vector
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The cross-encoder could not score query/document pairs
    #[error("Reranking error: {0}")]
    Reranking(String),
}

impl MLError {
    pub fn embedding(msg: impl fmt::Display) -> Self {
        Self::Embedding(msg.to_string())
    }

    pub fn reranking(msg: impl fmt::Display) -> Self {
        Self::Reranking(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MLError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            MLError::embedding("cannot embed empty text").to_string(),
            "Embedding error: cannot embed empty text"
        );
        assert_eq!(
            MLError::reranking("pairs rejected").to_string(),
            "Reranking error: pairs rejected"
        );
    }
}
