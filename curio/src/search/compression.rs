//! Contextual compression of retrieved content.

use crate::config::RetrievalConfig;

use super::annotator::matching_profiles;

/// Most sentences kept per document
pub const MAX_SENTENCES: usize = 3;

/// Characters kept when no sentence is relevant
pub const FALLBACK_CHARS: usize = 200;

/// Keep the sentences relevant to the query and the student group.
///
/// Content is split on `". "`. Sentences containing a query word come
/// first, then sentences containing a compression term of the first group
/// profile matching the context; duplicates are skipped and at most
/// [`MAX_SENTENCES`] are joined back with `". "`. Without any relevant
/// sentence the first [`FALLBACK_CHARS`] characters are returned.
///
/// Query words are matched as substrings with no stop-word filtering, so a
/// query holding "a" or "the" selects nearly every sentence.
pub fn compress_content(
    config: &RetrievalConfig,
    query: &str,
    content: &str,
    group_context: &str,
) -> String {
    let query_terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    let group_terms: Vec<String> = matching_profiles(&config.group_profiles, group_context)
        .first()
        .map(|p| p.compression_terms.iter().map(|t| t.to_lowercase()).collect())
        .unwrap_or_default();

    let sentences: Vec<&str> = content.split(". ").collect();
    let lowered: Vec<String> = sentences.iter().map(|s| s.to_lowercase()).collect();
    let mut selected: Vec<usize> = Vec::new();

    for terms in [&query_terms, &group_terms] {
        for (i, sentence) in lowered.iter().enumerate() {
            if !selected.contains(&i) && terms.iter().any(|t| sentence.contains(t.as_str())) {
                selected.push(i);
            }
        }
    }

    if selected.is_empty() {
        return content.chars().take(FALLBACK_CHARS).collect();
    }

    selected
        .into_iter()
        .take(MAX_SENTENCES)
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "Students explore volcanoes. Lava flows are measured. \
        Use visual diagrams for support. Volcanoes form at plate boundaries. \
        Eruptions release gas";

    #[test]
    fn test_query_sentences_come_first() {
        let config = RetrievalConfig::default();
        let compressed = compress_content(&config, "Volcanoes", CONTENT, "ESL learners");
        assert_eq!(
            compressed,
            "Students explore volcanoes. Volcanoes form at plate boundaries. Use visual diagrams for support"
        );
    }

    #[test]
    fn test_at_most_three_sentences() {
        let config = RetrievalConfig::default();
        let compressed = compress_content(&config, "a", CONTENT, "");
        assert_eq!(compressed.split(". ").count(), MAX_SENTENCES);
    }

    #[test]
    fn test_fallback_to_prefix() {
        let config = RetrievalConfig::default();
        let long = "z".repeat(500);
        let compressed = compress_content(&config, "photosynthesis", &long, "");
        assert_eq!(compressed.chars().count(), FALLBACK_CHARS);

        assert_eq!(compress_content(&config, "photosynthesis", "", ""), "");
    }
}
