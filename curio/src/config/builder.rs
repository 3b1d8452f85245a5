//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;
use std::time::Duration;

/// Builder for creating CurioConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: CurioConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: CurioConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: CurioConfig) -> Self {
        Self { config }
    }

    /// Set the semantic weight of hybrid search.
    pub fn with_hybrid_alpha(mut self, alpha: f32) -> Self {
        self.config.retrieval.hybrid_alpha = alpha;
        self
    }

    /// Set the number of results returned per request.
    pub fn with_final_top_k(mut self, top_k: usize) -> Self {
        self.config.retrieval.final_top_k = top_k;
        self
    }

    /// Set the candidate pool size used before re-ranking.
    pub fn with_rerank_top_k(mut self, top_k: usize) -> Self {
        self.config.retrieval.rerank_top_k = top_k;
        self
    }

    /// Set the maximum number of query variants.
    pub fn with_expansion_queries(mut self, count: usize) -> Self {
        self.config.retrieval.expansion_queries = count;
        self
    }

    /// Set the weight of the recency multiplier.
    pub fn with_temporal_weight(mut self, weight: f32) -> Self {
        self.config.retrieval.temporal_weight = weight;
        self
    }

    /// Set the recency horizon and floor.
    pub fn with_temporal_decay(mut self, horizon: Duration, floor: f32) -> Self {
        self.config.retrieval.temporal = TemporalConfig { horizon, floor };
        self
    }

    /// Replace the student group marker-term table.
    pub fn with_group_profiles(mut self, profiles: Vec<GroupProfile>) -> Self {
        self.config.retrieval.group_profiles = profiles;
        self
    }

    /// Add a domain rule used by metadata-filtered search.
    pub fn with_domain_rule(mut self, keywords: &[&str], domain: impl Into<String>) -> Self {
        self.config.retrieval.domain_rules.push(DomainRule {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            domain: domain.into(),
        });
        self
    }

    /// Set external resource aggregation limits.
    pub fn with_resource_limits(mut self, max_per_source: usize, max_total: usize) -> Self {
        self.config.resources.max_per_source = max_per_source;
        self.config.resources.max_total = max_total;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging = LoggingConfig::default();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<CurioConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }

    /// Create a configuration for local development.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Create a configuration for tests: quiet logging, default weights.
    pub fn testing() -> Self {
        let mut builder = Self::new().with_log_level(LogLevel::Warn);
        builder.config.logging.stdout = false;
        builder
    }

    /// Create a configuration for production: JSON logs at Info level.
    pub fn production() -> Self {
        Self::new()
            .with_log_level(LogLevel::Info)
            .with_log_format(LogFormat::Json)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
