//! Search backends.
//!
//! Retrieval depends on two backend traits:
//!
//! - [`SimilarityService`]: vector similarity search with payload filters
//! - [`KeywordSearch`]: lexical search, optional for a retriever
//!
//! [`InMemoryIndex`] implements both over a linear scan and is the backend
//! used by the CLI and the tests.

pub mod errors;
pub mod filters;
pub mod memory;
pub mod models;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use filters::{FieldCondition, SearchFilter};
pub use memory::InMemoryIndex;
pub use models::{Document, SearchHit};
pub use traits::{KeywordSearch, SimilarityService};
