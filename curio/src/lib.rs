//! # Curio
//!
//! Multi-strategy retrieval for lesson-plan generation. Curio takes a teacher's
//! query together with the subject, grade and an optional description of the
//! student group, pulls candidate curriculum standards and cached external
//! resources out of a similarity index, and ranks them with one of eleven
//! scoring strategies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use curio::prelude::*;
//! use curio::ml::HashingEmbedder;
//! use curio::storage::{Document, InMemoryIndex};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let embedder = Arc::new(HashingEmbedder::default());
//!     let index = Arc::new(InMemoryIndex::new());
//!     index
//!         .index_document(
//!             embedder.as_ref(),
//!             Document::new("Students add fractions with unlike denominators using visual models.")
//!                 .with_field("subject", "Mathematics")
//!                 .with_field("grade", "5"),
//!         )
//!         .await?;
//!
//!     let retriever = AdvancedRetriever::builder(embedder, index.clone())
//!         .keyword_search(index)
//!         .build();
//!
//!     let outcome = retriever
//!         .advanced_retrieve(
//!             "adding fractions",
//!             "Mathematics",
//!             "5",
//!             RetrievalStrategy::HybridSearch,
//!             "ESL students",
//!         )
//!         .await?;
//!
//!     for result in outcome.results() {
//!         println!("{:.3} {}", result.score, result.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Collaborators** (traits): similarity search, keyword search, embedders,
//!   cross-encoders and external resource providers. In-memory reference
//!   implementations live next to each trait.
//! - **Scoring**: result merging, relevance annotation, boosts, query
//!   expansion and contextual compression.
//! - **Retrieval**: the strategy dispatcher, the scoring pipelines and the
//!   service layer that formats results for the lesson-plan agent.

pub mod config;
pub mod logging;
pub mod ml;
pub mod models;
pub mod resources;
pub mod retrieval;
pub mod search;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, CurioConfig, LogLevel, RetrievalConfig};

    pub use crate::models::{
        EmptyReason, RetrievalCandidate, RetrievalOutcome, RetrievalResult, RetrievalStrategy,
        StandardRecord,
    };

    pub use crate::retrieval::{AdvancedRetriever, AdvancedRetrieverBuilder, RetrievalService};

    pub use crate::resources::{ResourceAggregator, ResourceProvider, ResourceRecord};

    pub use crate::{CurioError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Curio operations
#[derive(Debug, thiserror::Error)]
pub enum CurioError {
    /// Error reported by a similarity or keyword search backend
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// Error reported by an embedder or cross-encoder
    #[error("ML error: {0}")]
    ML(#[from] crate::ml::MLError),

    /// Error reported by an external resource provider
    #[error("Resource error: {0}")]
    Resource(#[from] crate::resources::ResourceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for CurioError {
    fn from(err: crate::config::ConfigError) -> Self {
        CurioError::Configuration(err.to_string())
    }
}

impl CurioError {
    /// Whether the error means a backend could not be reached at all.
    ///
    /// Pipelines recover from most collaborator errors locally; an
    /// unreachable backend is the one failure that propagates to the caller
    /// of [`retrieval::AdvancedRetriever::advanced_retrieve`].
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CurioError::Storage(e) if e.is_unavailable())
    }
}

/// Result type for Curio operations
pub type Result<T> = std::result::Result<T, CurioError>;

/// Initialize logging from the configuration and validate it.
///
/// Returns the validated configuration so callers can hand its retrieval
/// section to [`retrieval::AdvancedRetrieverBuilder::config`].
///
/// # Examples
///
/// ```rust,no_run
/// use curio::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = curio::init(ConfigBuilder::development().build()?)?;
///     assert!(config.retrieval.final_top_k > 0);
///     Ok(())
/// }
/// ```
pub fn init(config: config::CurioConfig) -> Result<config::CurioConfig> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    config::validate_config(&config)?;

    Ok(config)
}
