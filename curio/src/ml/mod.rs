//! Embedding and relevance models.
//!
//! Retrieval talks to models through two traits:
//! - [`Embedder`] turns text into a vector for similarity search
//! - [`CrossEncoder`] scores `(query, document)` pairs for re-ranking
//!
//! Both are collaborators injected into the retriever. The deterministic
//! [`HashingEmbedder`] and [`TermOverlapCrossEncoder`] need no model files
//! and back the CLI and the tests.
//!
//! ## Example Usage
//!
//! ```rust
//! use curio::ml::{Embedder, HashingEmbedder};
//!
//! # async fn example() -> curio::ml::Result<()> {
//! let embedder = HashingEmbedder::new(128);
//! let vector = embedder.embed("fractions with visual models").await?;
//! assert_eq!(vector.len(), 128);
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod reranker;
pub mod tokenizer;

pub use embedding::{Embedder, HashingEmbedder, cosine_similarity};
pub use error::{MLError, Result};
pub use reranker::{CrossEncoder, TermOverlapCrossEncoder};

/// Type for embedding vectors
pub type EmbeddingVector = Vec<f32>;
