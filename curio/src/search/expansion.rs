//! Query expansion.

use crate::config::RetrievalConfig;

use super::annotator::matching_profiles;

/// Keyword-triggered paraphrases, each prefixed with `"{subject} {grade}"`.
const KEYWORD_EXPANSIONS: &[(&[&str], &[&str])] = &[
    (
        &["objectives"],
        &["learning goals", "educational outcomes", "student expectations"],
    ),
    (
        &["assessment"],
        &["evaluation methods", "testing strategies", "student assessment"],
    ),
    (
        &["materials", "resources"],
        &["teaching materials", "educational resources", "classroom supplies"],
    ),
];

/// Query variants for expansion search.
///
/// The original query always comes first, followed by keyword paraphrases
/// and then the suffixes of the first group profile matching the context.
/// The list is cut to `expansion_queries` entries.
pub fn expand_query(
    config: &RetrievalConfig,
    query: &str,
    subject: &str,
    grade: &str,
    group_context: &str,
) -> Vec<String> {
    let mut variants = vec![query.to_string()];
    let lowered = query.to_lowercase();

    for (keywords, paraphrases) in KEYWORD_EXPANSIONS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            variants.extend(
                paraphrases
                    .iter()
                    .map(|p| format!("{} {} {}", subject, grade, p)),
            );
        }
    }

    if let Some(profile) = matching_profiles(&config.group_profiles, group_context).first() {
        variants.extend(
            profile
                .expansion_suffixes
                .iter()
                .map(|suffix| format!("{} {}", query, suffix)),
        );
    }

    variants.truncate(config.expansion_queries.max(1));
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_query_comes_first() {
        let config = RetrievalConfig::default();
        let variants = expand_query(&config, "plant cells", "Science", "6", "");
        assert_eq!(variants, vec!["plant cells"]);
    }

    #[test]
    fn test_keyword_paraphrases_are_truncated() {
        let config = RetrievalConfig::default();
        let variants = expand_query(&config, "Fraction objectives", "Mathematics", "4", "");
        assert_eq!(
            variants,
            vec![
                "Fraction objectives",
                "Mathematics 4 learning goals",
                "Mathematics 4 educational outcomes",
            ]
        );
    }

    #[test]
    fn test_group_suffixes_use_first_matching_profile() {
        let mut config = RetrievalConfig::default();
        config.expansion_queries = 10;
        let variants = expand_query(&config, "volcanoes", "Science", "5", "ADHD and gifted");
        assert_eq!(
            variants,
            vec![
                "volcanoes",
                "volcanoes movement activities",
                "volcanoes interactive learning",
                "volcanoes kinesthetic approaches",
            ]
        );
    }

    #[test]
    fn test_all_keyword_groups_can_fire() {
        let mut config = RetrievalConfig::default();
        config.expansion_queries = 20;
        let variants = expand_query(
            &config,
            "assessment materials and objectives",
            "Art",
            "2",
            "",
        );
        assert_eq!(variants.len(), 10);
        assert_eq!(variants[1], "Art 2 learning goals");
        assert_eq!(variants[4], "Art 2 evaluation methods");
        assert_eq!(variants[9], "Art 2 classroom supplies");
    }
}
