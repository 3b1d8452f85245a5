//! Retrieval data model: candidates, results, strategies and the
//! agent-facing standard records.

pub mod candidate;
pub mod result;
pub mod standard;
pub mod strategy;

pub use candidate::{Metadata, RetrievalCandidate};
pub use result::{EmptyReason, RetrievalOutcome, RetrievalResult};
pub use standard::StandardRecord;
pub use strategy::RetrievalStrategy;
