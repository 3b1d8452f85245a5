//! Scoring building blocks shared by the retrieval pipelines
//!
//! - [`merger`]: deduplication and score combination across searches
//! - [`annotator`]: student group relevance labels
//! - [`calculator`]: boosts, recency decay and re-rank blending
//! - [`expansion`]: query variants
//! - [`compression`]: query-relevant sentence extraction
//! - [`filters`]: request-derived metadata filters
//! - [`sources`]: source tag classification
//!
//! # Example
//!
//! ```
//! use curio::config::RetrievalConfig;
//! use curio::models::RetrievalCandidate;
//! use curio::search::ScoreCalculator;
//!
//! let config = RetrievalConfig::default();
//! let calculator = ScoreCalculator::new(&config);
//!
//! let video = RetrievalCandidate::new("Fractions on a number line", 0.5)
//!     .field("source", "YouTube")
//!     .field("resource_url", "https://www.youtube.com/watch?v=abc");
//! let boosted = video.score * calculator.external_resource_multiplier(&video);
//! assert!((boosted - 0.91).abs() < 1e-5);
//! ```

pub mod annotator;
pub mod calculator;
pub mod compression;
pub mod expansion;
pub mod filters;
pub mod merger;
pub mod sources;

pub use annotator::{RelevanceAnnotator, matching_profiles};
pub use calculator::ScoreCalculator;
pub use compression::compress_content;
pub use expansion::expand_query;
pub use filters::{infer_domain, metadata_filter};
pub use merger::{dedup_key, merge_max, merge_weighted};
pub use sources::{SourceKind, classify, normalize_source};
