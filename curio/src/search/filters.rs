//! Metadata filters derived from the request.

use crate::config::RetrievalConfig;
use crate::storage::SearchFilter;

/// The curriculum domain implied by the query, from the first domain rule
/// with a keyword in the lower-cased query.
pub fn infer_domain<'a>(config: &'a RetrievalConfig, query: &str) -> Option<&'a str> {
    let query = query.to_lowercase();
    config
        .domain_rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| query.contains(&k.to_lowercase())))
        .map(|rule| rule.domain.as_str())
}

/// Subject, grade and inferred-domain filter for metadata-filtered search.
pub fn metadata_filter(
    config: &RetrievalConfig,
    query: &str,
    subject: &str,
    grade: &str,
) -> SearchFilter {
    let filter = SearchFilter::subject_grade(subject, grade);
    match infer_domain(config, query) {
        Some(domain) => filter.must("domain", domain),
        None => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_inference() {
        let config = RetrievalConfig::default();
        assert_eq!(infer_domain(&config, "Adding Decimals"), Some("Number and Operations"));
        assert_eq!(infer_domain(&config, "area of a circle"), Some("Geometry"));
        assert_eq!(infer_domain(&config, "poetry"), None);
        // First rule wins
        assert_eq!(
            infer_domain(&config, "fractions of an area"),
            Some("Number and Operations")
        );
    }

    #[test]
    fn test_filter_condition_count() {
        let config = RetrievalConfig::default();
        assert_eq!(metadata_filter(&config, "geometry", "Mathematics", "7").len(), 3);
        assert_eq!(metadata_filter(&config, "poetry", "English", "7").len(), 2);
        assert_eq!(metadata_filter(&config, "poetry", "", "").len(), 0);
    }
}
