//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &CurioConfig) -> Result<(), ConfigError> {
    validate_retrieval_config(&config.retrieval)?;
    validate_resource_config(&config.resources)?;

    Ok(())
}

/// Validate retrieval weights and tables.
pub fn validate_retrieval_config(config: &RetrievalConfig) -> Result<(), ConfigError> {
    let weights = [
        ("hybrid_alpha", config.hybrid_alpha),
        ("temporal_weight", config.temporal_weight),
        ("metadata_boost", config.metadata_boost),
        ("student_group_weight", config.student_group_weight),
        ("external_resource_weight", config.external_resource_weight),
    ];
    for (name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    if config.hybrid_alpha > 1.0 {
        return Err(ConfigError::ValidationError(format!(
            "hybrid_alpha must be at most 1.0, got {}",
            config.hybrid_alpha
        )));
    }

    if config.final_top_k == 0 {
        return Err(ConfigError::ValidationError(
            "final_top_k must be greater than 0".to_string(),
        ));
    }

    if config.expansion_queries == 0 {
        return Err(ConfigError::ValidationError(
            "expansion_queries must be greater than 0".to_string(),
        ));
    }

    if config.temporal.horizon.is_zero() {
        return Err(ConfigError::ValidationError(
            "temporal.horizon must be greater than 0".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.temporal.floor) {
        return Err(ConfigError::ValidationError(format!(
            "temporal.floor must be between 0.0 and 1.0, got {}",
            config.temporal.floor
        )));
    }

    for profile in &config.group_profiles {
        if profile.triggers.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "Group profile '{}' needs at least one trigger",
                profile.name
            )));
        }
    }

    for rule in &config.domain_rules {
        if rule.domain.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Domain rule domain cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate external resource limits.
fn validate_resource_config(config: &ResourceConfig) -> Result<(), ConfigError> {
    if config.max_total == 0 {
        return Err(ConfigError::ValidationError(
            "resources.max_total must be greater than 0".to_string(),
        ));
    }
    if config.max_per_source == 0 {
        return Err(ConfigError::ValidationError(
            "resources.max_per_source must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
