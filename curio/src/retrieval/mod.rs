//! Strategy dispatch, scoring pipelines and the service layer.
//!
//! [`AdvancedRetriever`] owns the collaborators (embedders, indexes, the
//! optional keyword backend and cross-encoder) and an immutable
//! [`RetrievalConfig`](crate::config::RetrievalConfig). Each call to
//! [`AdvancedRetriever::advanced_retrieve`] routes one request to one of the
//! eleven pipelines in [`pipelines`].
//!
//! [`RetrievalService`] wraps a retriever for the lesson-plan agent: it
//! formats results as [`StandardRecord`](crate::models::StandardRecord)s and
//! falls back to plain similarity search plus external resources when a
//! strategy fails.

pub mod pipelines;
pub mod retriever;
pub mod service;

pub use retriever::{AdvancedRetriever, AdvancedRetrieverBuilder, EmbeddingSource, RetrievalRequest};
pub use service::RetrievalService;
