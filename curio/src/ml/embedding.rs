//! Embedding model interface and a deterministic hashing embedder.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::EmbeddingVector;
use super::error::{MLError, Result};
use super::tokenizer::tokenize;

/// Interface for models that turn text into vectors.
#[async_trait]
pub trait Embedder: Send + Sync + 'static {
    /// Name used in logs and explanations
    fn name(&self) -> &str;

    /// Length of the vectors produced by [`Embedder::embed`]
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<EmbeddingVector>;
}

/// Cosine similarity of two vectors; zero when either has no magnitude or
/// the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Feature-hashing embedder.
///
/// Every word token (and every adjacent word pair) is hashed with SHA-256
/// into one of `dimension` buckets with a hash-derived sign, and the result
/// is scaled to unit length. Texts sharing vocabulary land close together,
/// which is enough for tests and small offline corpora.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    name: String,
    dimension: usize,
    salt: String,
}

impl HashingEmbedder {
    /// Default vector length
    pub const DEFAULT_DIMENSION: usize = 256;

    /// Create an embedder with the given vector length.
    pub fn new(dimension: usize) -> Self {
        Self {
            name: "hashing".to_string(),
            dimension: dimension.max(1),
            salt: String::new(),
        }
    }

    /// A differently salted embedder, producing an independent vector space.
    ///
    /// Used to stand in for secondary embedding models.
    pub fn with_salt(mut self, name: impl Into<String>, salt: impl Into<String>) -> Self {
        self.name = name.into();
        self.salt = salt.into();
        self
    }

    fn bucket(&self, feature: &str) -> (usize, f32) {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(feature.as_bytes());
        let digest = hasher.finalize();

        let mut index_bytes = [0u8; 8];
        index_bytes.copy_from_slice(&digest[..8]);
        let index = (u64::from_le_bytes(index_bytes) % self.dimension as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }

    fn embed_sync(&self, text: &str) -> EmbeddingVector {
        let tokens = tokenize(text);
        let mut vector = vec![0.0f32; self.dimension];

        for token in &tokens {
            let (index, sign) = self.bucket(token);
            vector[index] += sign;
        }
        for pair in tokens.windows(2) {
            let (index, sign) = self.bucket(&format!("{} {}", pair[0], pair[1]));
            vector[index] += 0.5 * sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        if text.trim().is_empty() {
            return Err(MLError::embedding("cannot embed empty text"));
        }
        Ok(self.embed_sync(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_is_deterministic_and_normalized() {
        let embedder = HashingEmbedder::new(64);
        let a = embedder.embed("Multiply fractions by whole numbers").await.unwrap();
        let b = embedder.embed("Multiply fractions by whole numbers").await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_is_closer() {
        let embedder = HashingEmbedder::default();
        let query = embedder.embed("adding fractions").await.unwrap();
        let related = embedder
            .embed("Students practice adding fractions with unlike denominators")
            .await
            .unwrap();
        let unrelated = embedder
            .embed("The water cycle moves moisture through evaporation")
            .await
            .unwrap();

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_salt_changes_vector_space() {
        let plain = HashingEmbedder::new(64);
        let salted = HashingEmbedder::new(64).with_salt("secondary", "v2");
        let a = plain.embed("geometry area").await.unwrap();
        let b = salted.embed("geometry area").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(salted.name(), "secondary");
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let embedder = HashingEmbedder::default();
        assert!(matches!(
            embedder.embed("   ").await,
            Err(MLError::Embedding(_))
        ));
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }
}
