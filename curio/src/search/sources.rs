//! Source tag classification.
//!
//! Candidates carry a free-text `source` tag such as `"NGSS"`,
//! `"YouTube"` or `"Common Core (Cached)"`. Boosts compare the normalized
//! form: lower-cased, trimmed, with a trailing parenthesized qualifier
//! removed.

use serde::{Deserialize, Serialize};

/// Broad class of a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Standards bodies whose documents change rarely (Common Core, NGSS)
    StandardsBody,
    /// Fast-moving public media (YouTube, Wikipedia)
    PublicMedia,
    /// Interactive activities and assessment banks
    Activity,
    /// Agency resources such as NASA
    Agency,
    /// Anything else, including a missing tag
    Other,
}

/// Normalize a source tag for comparison.
///
/// ```
/// use curio::search::sources::normalize_source;
///
/// assert_eq!(normalize_source("Common Core (Cached)"), "common core");
/// assert_eq!(normalize_source("  YouTube "), "youtube");
/// ```
pub fn normalize_source(tag: &str) -> String {
    let trimmed = tag.trim();
    let base = match trimmed.rfind('(') {
        Some(open) if trimmed.ends_with(')') => &trimmed[..open],
        _ => trimmed,
    };
    base.trim().to_lowercase()
}

/// Classify a source tag.
pub fn classify(tag: Option<&str>) -> SourceKind {
    let Some(tag) = tag else {
        return SourceKind::Other;
    };
    match normalize_source(tag).as_str() {
        "common core" | "ngss" => SourceKind::StandardsBody,
        "youtube" | "wikipedia" => SourceKind::PublicMedia,
        "interactive" | "assessment" => SourceKind::Activity,
        "nasa" => SourceKind::Agency,
        _ => SourceKind::Other,
    }
}
