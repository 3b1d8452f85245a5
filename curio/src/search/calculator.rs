//! Score adjustments applied by the scoring pipelines
//!
//! Every adjustment here is a pure function of a candidate, the request and
//! the retrieval configuration. Pipelines call each adjustment at most once
//! per candidate.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::{RetrievalConfig, TemporalConfig};
use crate::models::RetrievalCandidate;

use super::annotator::matching_profiles;
use super::sources::{SourceKind, classify};

/// Weight of the cross-encoder score in re-ranking
pub const RERANK_WEIGHT: f32 = 0.7;

/// Weight of the original similarity score in re-ranking
pub const ORIGINAL_WEIGHT: f32 = 0.3;

/// Multiplier for content matching the student group
pub const GROUP_BOOST: f32 = 1.3;

/// Multiplier for candidates with a usable resource URL
pub const RESOURCE_URL_BOOST: f32 = 1.3;

/// Calculator for the boosts and blends used by the scoring pipelines
///
/// Borrows the retrieval configuration for the duration of one request.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCalculator<'a> {
    config: &'a RetrievalConfig,
}

impl<'a> ScoreCalculator<'a> {
    /// Create a calculator over the given configuration
    pub fn new(config: &'a RetrievalConfig) -> Self {
        Self { config }
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &RetrievalConfig {
        self.config
    }

    /// Blend a cross-encoder score with the original similarity score.
    pub fn rerank_score(&self, rerank: f32, original: f32) -> f32 {
        RERANK_WEIGHT * rerank + ORIGINAL_WEIGHT * original
    }

    /// Recency multiplier for a `cached_at` value at time `now`.
    ///
    /// Decays linearly from 1.0 to `floor` over the configured horizon.
    /// Missing or unreadable timestamps count as fresh, and timestamps in
    /// the future count as now.
    pub fn recency_multiplier(&self, cached_at: Option<&Value>, now: DateTime<Utc>) -> f32 {
        let Some(cached_at) = cached_at.and_then(parse_timestamp) else {
            return 1.0;
        };
        linear_decay(&self.config.temporal, (now - cached_at).num_seconds() as f64 / 3600.0)
    }

    /// Full temporal multiplier: recency times the source volatility factor.
    pub fn temporal_multiplier(&self, candidate: &RetrievalCandidate, now: DateTime<Utc>) -> f32 {
        let recency = self.recency_multiplier(candidate.metadata.get("cached_at"), now);
        let volatility = match classify(candidate.source()) {
            SourceKind::StandardsBody => 1.2,
            SourceKind::PublicMedia => 1.3,
            _ => 1.0,
        };
        recency * volatility
    }

    /// Temporal score: `score * (1 + temporal_weight * multiplier)`.
    pub fn temporal_score(&self, score: f32, multiplier: f32) -> f32 {
        score * (1.0 + self.config.temporal_weight * multiplier)
    }

    /// Multiplier favouring external resources.
    ///
    /// Public media and activities earn 1.4, standards bodies and agencies
    /// 1.2, and a resource URL that is not a placeholder a further 1.3.
    pub fn external_resource_multiplier(&self, candidate: &RetrievalCandidate) -> f32 {
        let source_factor = match classify(candidate.source()) {
            SourceKind::PublicMedia | SourceKind::Activity => 1.4,
            SourceKind::StandardsBody | SourceKind::Agency => 1.2,
            SourceKind::Other => 1.0,
        };
        let url_factor = match candidate.metadata_str("resource_url") {
            Some(url) if !url.is_empty() && !url.starts_with("example") => RESOURCE_URL_BOOST,
            _ => 1.0,
        };
        source_factor * url_factor
    }

    /// Group multiplier: [`GROUP_BOOST`] when the content contains a boost
    /// term of any profile matching the group context, otherwise 1.0.
    pub fn group_multiplier(&self, content: &str, group_context: &str) -> f32 {
        let profiles = matching_profiles(&self.config.group_profiles, group_context);
        if profiles.is_empty() {
            return 1.0;
        }
        let content = content.to_lowercase();
        let boosted = profiles
            .iter()
            .any(|p| p.boost_terms.iter().any(|t| content.contains(&t.to_lowercase())));
        if boosted { GROUP_BOOST } else { 1.0 }
    }
}

fn linear_decay(temporal: &TemporalConfig, age_hours: f64) -> f32 {
    let horizon = temporal.horizon_hours();
    if horizon <= 0.0 {
        return temporal.floor;
    }
    let fresh = 1.0 - age_hours.max(0.0) / horizon;
    (fresh as f32).max(temporal.floor)
}

/// Read a timestamp given as unix seconds or an RFC 3339 string.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => from_unix_seconds(n.as_f64()?),
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| from_unix_seconds(s.trim().parse().ok()?)),
        _ => None,
    }
}

fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}
