//! Configuration model definitions.
//!
//! This module contains the configuration structures for all Curio components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure for Curio.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CurioConfig {
    /// Retrieval weights and scoring tables
    pub retrieval: RetrievalConfig,

    /// External resource aggregation
    pub resources: ResourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Process-wide retrieval weights.
///
/// Set once when the retriever is built and read-only afterwards. Every
/// pipeline receives it by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Weight of the semantic branch in hybrid search; the keyword branch
    /// gets `1 - hybrid_alpha`
    pub hybrid_alpha: f32,

    /// Maximum number of query variants, the original query included
    pub expansion_queries: usize,

    /// Candidate pool size before cross-encoder re-ranking
    pub rerank_top_k: usize,

    /// Number of results returned per request
    pub final_top_k: usize,

    /// Weight of the recency multiplier in temporal search
    pub temporal_weight: f32,

    /// Boost for metadata matches. Not consumed by the built-in pipelines.
    pub metadata_boost: f32,

    /// Weight for student group relevance. Not consumed by the built-in pipelines.
    pub student_group_weight: f32,

    /// Weight for external resource relevance. Not consumed by the built-in pipelines.
    pub external_resource_weight: f32,

    /// Recency decay settings
    pub temporal: TemporalConfig,

    /// Student group marker-term table
    pub group_profiles: Vec<GroupProfile>,

    /// Query keyword to curriculum domain rules for metadata filtering
    pub domain_rules: Vec<DomainRule>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            hybrid_alpha: 0.7,
            expansion_queries: 3,
            rerank_top_k: 20,
            final_top_k: 5,
            temporal_weight: 0.1,
            metadata_boost: 0.2,
            student_group_weight: 0.3,
            external_resource_weight: 0.4,
            temporal: TemporalConfig::default(),
            group_profiles: GroupProfile::defaults(),
            domain_rules: DomainRule::defaults(),
        }
    }
}

/// Linear recency decay applied by temporal search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Age at which the multiplier reaches zero before flooring
    #[serde(with = "humantime_serde")]
    pub horizon: Duration,

    /// Lowest multiplier an old document can receive
    pub floor: f32,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            horizon: Duration::from_secs(8760 * 3600),
            floor: 0.5,
        }
    }
}

impl TemporalConfig {
    /// Horizon expressed in hours.
    pub fn horizon_hours(&self) -> f64 {
        self.horizon.as_secs_f64() / 3600.0
    }
}

/// A student group with the terms that mark content as suited to it.
///
/// A profile applies to a request when any of its `triggers` occurs in the
/// student group description (case-insensitive).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupProfile {
    /// Short group name used in logs
    pub name: String,

    /// Phrases that identify the group in a free-text description
    pub triggers: Vec<String>,

    /// Category label reported by the relevance annotator
    pub label: String,

    /// Content terms that make the annotator report `label`
    pub annotation_terms: Vec<String>,

    /// Content terms that earn the student-group-aware boost
    pub boost_terms: Vec<String>,

    /// Suffixes appended to the query by query expansion
    pub expansion_suffixes: Vec<String>,

    /// Sentence terms kept by contextual compression
    pub compression_terms: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl GroupProfile {
    /// Whether the group description mentions this group.
    pub fn matches(&self, group_context: &str) -> bool {
        let context = group_context.to_lowercase();
        self.triggers
            .iter()
            .any(|t| context.contains(&t.to_lowercase()))
    }

    /// The built-in table covering English learners, ADHD, learning
    /// disabilities and gifted students.
    pub fn defaults() -> Vec<GroupProfile> {
        vec![
            GroupProfile {
                name: "ESL".to_string(),
                triggers: strings(&["ESL", "English language"]),
                label: "Visual/kinesthetic support".to_string(),
                annotation_terms: strings(&[
                    "visual",
                    "hands-on",
                    "multimodal",
                    "support",
                    "accommodation",
                ]),
                boost_terms: strings(&["visual", "hands-on", "multimodal", "support"]),
                expansion_suffixes: strings(&[
                    "visual supports",
                    "hands-on activities",
                    "multimodal learning",
                ]),
                compression_terms: strings(&["visual", "hands-on", "support", "accommodation"]),
            },
            GroupProfile {
                name: "ADHD".to_string(),
                triggers: strings(&["ADHD"]),
                label: "Movement-based learning".to_string(),
                annotation_terms: strings(&[
                    "movement",
                    "kinesthetic",
                    "interactive",
                    "short",
                    "active",
                ]),
                boost_terms: strings(&["movement", "kinesthetic", "interactive", "short"]),
                expansion_suffixes: strings(&[
                    "movement activities",
                    "interactive learning",
                    "kinesthetic approaches",
                ]),
                compression_terms: strings(&["movement", "interactive", "kinesthetic", "active"]),
            },
            GroupProfile {
                name: "Learning disability".to_string(),
                triggers: strings(&["learning disability"]),
                label: "Differentiated instruction".to_string(),
                annotation_terms: strings(&[
                    "differentiated",
                    "accommodation",
                    "alternative",
                    "support",
                    "modified",
                ]),
                boost_terms: strings(&[
                    "differentiated",
                    "accommodation",
                    "alternative",
                    "support",
                ]),
                expansion_suffixes: strings(&[
                    "differentiated instruction",
                    "accommodations",
                    "alternative methods",
                ]),
                compression_terms: strings(&[
                    "differentiated",
                    "accommodation",
                    "alternative",
                    "support",
                ]),
            },
            GroupProfile {
                name: "Gifted".to_string(),
                triggers: strings(&["gifted"]),
                label: "Advanced content".to_string(),
                annotation_terms: strings(&[
                    "advanced",
                    "challenge",
                    "enrichment",
                    "extension",
                    "complex",
                ]),
                boost_terms: strings(&["advanced", "challenge", "enrichment", "extension"]),
                expansion_suffixes: strings(&[
                    "enrichment activities",
                    "advanced challenges",
                    "extension projects",
                ]),
                compression_terms: strings(&["advanced", "challenge", "enrichment", "extension"]),
            },
        ]
    }
}

/// Maps query keywords to a curriculum domain filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainRule {
    /// Lower-case keywords searched for in the query
    pub keywords: Vec<String>,

    /// Value of the `domain` payload field to filter on
    pub domain: String,
}

impl DomainRule {
    /// Built-in mathematics domain rules.
    pub fn defaults() -> Vec<DomainRule> {
        vec![
            DomainRule {
                keywords: strings(&["fractions", "decimals"]),
                domain: "Number and Operations".to_string(),
            },
            DomainRule {
                keywords: strings(&["geometry", "area"]),
                domain: "Geometry".to_string(),
            },
        ]
    }
}

/// External resource aggregation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Most records taken from a single provider
    pub max_per_source: usize,

    /// Most records returned overall
    pub max_total: usize,

    /// Subjects for which science-only providers are queried
    pub science_subjects: Vec<String>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            max_per_source: 3,
            max_total: 10,
            science_subjects: strings(&[
                "science",
                "physics",
                "chemistry",
                "biology",
                "astronomy",
            ]),
        }
    }
}

impl ResourceConfig {
    /// Whether `subject` is one of the configured science subjects.
    pub fn is_science(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.science_subjects
            .iter()
            .any(|s| s.to_lowercase() == subject)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to the console (stderr)
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
