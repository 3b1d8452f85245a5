//! Student group relevance annotation.

use crate::config::GroupProfile;

/// Profiles whose triggers occur in the group context.
///
/// A blank context matches nothing.
pub fn matching_profiles<'a>(
    profiles: &'a [GroupProfile],
    group_context: &str,
) -> Vec<&'a GroupProfile> {
    if group_context.trim().is_empty() {
        return Vec::new();
    }
    profiles.iter().filter(|p| p.matches(group_context)).collect()
}

/// Explains why content suits a student group.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceAnnotator<'a> {
    profiles: &'a [GroupProfile],
}

impl<'a> RelevanceAnnotator<'a> {
    pub fn new(profiles: &'a [GroupProfile]) -> Self {
        Self { profiles }
    }

    /// Labels of every matching profile whose annotation terms occur in the
    /// content, joined with `"; "`. `None` when the context is blank or no
    /// label applies.
    pub fn assess_group_relevance(&self, content: &str, group_context: &str) -> Option<String> {
        let content = content.to_lowercase();
        let labels: Vec<&str> = matching_profiles(self.profiles, group_context)
            .into_iter()
            .filter(|p| {
                p.annotation_terms
                    .iter()
                    .any(|t| content.contains(&t.to_lowercase()))
            })
            .map(|p| p.label.as_str())
            .collect();

        if labels.is_empty() {
            None
        } else {
            Some(labels.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adhd_examples() {
        let profiles = GroupProfile::defaults();
        let annotator = RelevanceAnnotator::new(&profiles);

        assert_eq!(annotator.assess_group_relevance("", "ADHD context"), None);

        let relevance = annotator
            .assess_group_relevance("interactive movement activity", "ADHD")
            .unwrap();
        assert!(relevance.contains("Movement-based learning"));
    }

    #[test]
    fn test_blank_context_is_none() {
        let profiles = GroupProfile::defaults();
        let annotator = RelevanceAnnotator::new(&profiles);
        assert_eq!(annotator.assess_group_relevance("visual support", ""), None);
        assert_eq!(annotator.assess_group_relevance("visual support", "   "), None);
    }

    #[test]
    fn test_multiple_labels_are_joined_in_table_order() {
        let profiles = GroupProfile::defaults();
        let annotator = RelevanceAnnotator::new(&profiles);

        let relevance = annotator.assess_group_relevance(
            "Hands-on stations with enrichment challenges",
            "mixed class: ESL and gifted learners",
        );
        assert_eq!(
            relevance.as_deref(),
            Some("Visual/kinesthetic support; Advanced content")
        );
    }

    #[test]
    fn test_triggers_are_case_insensitive() {
        let profiles = GroupProfile::defaults();
        let annotator = RelevanceAnnotator::new(&profiles);
        assert!(
            annotator
                .assess_group_relevance("modified worksheets", "students with a Learning Disability")
                .is_some()
        );
        assert_eq!(
            annotator.assess_group_relevance("lecture notes", "students with adhd"),
            None
        );
    }
}
