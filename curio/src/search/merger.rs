//! Result merging and deduplication
//!
//! Candidates from several searches are deduplicated by a content prefix
//! and their scores combined. Two combinations are supported:
//!
//! - [`merge_weighted`]: each set carries a weight and scores on a shared
//!   key are summed as `Σ score * weight`
//! - [`merge_max`]: one entry per key, keeping the highest score
//!
//! Output is sorted by descending score; equal scores keep the order in
//! which their keys were first seen.

use std::collections::HashMap;

use crate::models::RetrievalCandidate;
use crate::models::candidate::sort_by_score;

/// Number of leading characters that identify a candidate.
pub const DEDUP_KEY_CHARS: usize = 100;

/// Deduplication key: the first [`DEDUP_KEY_CHARS`] characters of the content.
pub fn dedup_key(content: &str) -> String {
    content.chars().take(DEDUP_KEY_CHARS).collect()
}

#[derive(Default)]
struct MergeTable {
    entries: Vec<RetrievalCandidate>,
    index: HashMap<String, usize>,
}

impl MergeTable {
    fn upsert(
        &mut self,
        candidate: RetrievalCandidate,
        combine: impl FnOnce(&mut RetrievalCandidate, RetrievalCandidate),
    ) {
        let key = dedup_key(&candidate.content);
        match self.index.get(&key) {
            Some(&position) => combine(&mut self.entries[position], candidate),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(candidate);
            }
        }
    }

    fn into_ranked(mut self) -> Vec<RetrievalCandidate> {
        sort_by_score(&mut self.entries);
        self.entries
    }
}

/// Weighted-sum merge.
///
/// Each candidate contributes `score * weight`. When keys collide the
/// contributions are summed and the most recently merged candidate's
/// content and metadata are kept.
///
/// ```
/// use curio::models::RetrievalCandidate;
/// use curio::search::merger::merge_weighted;
///
/// let semantic = vec![RetrievalCandidate::new("Add fractions", 0.9)];
/// let keyword = vec![RetrievalCandidate::new("Add fractions", 0.5)];
/// let merged = merge_weighted(vec![(semantic, 0.7), (keyword, 0.3)]);
/// assert_eq!(merged.len(), 1);
/// assert!((merged[0].score - 0.78).abs() < 1e-6);
/// ```
pub fn merge_weighted(sets: Vec<(Vec<RetrievalCandidate>, f32)>) -> Vec<RetrievalCandidate> {
    let mut table = MergeTable::default();
    for (candidates, weight) in sets {
        for candidate in candidates {
            let weighted = candidate.scaled(weight);
            table.upsert(weighted, |existing, incoming| {
                let total = existing.score + incoming.score;
                *existing = incoming;
                existing.score = total;
            });
        }
    }
    table.into_ranked()
}

/// Max-after-dedup merge.
///
/// Keeps one candidate per key: the one with the highest score, together
/// with its own content and metadata.
pub fn merge_max(sets: Vec<Vec<RetrievalCandidate>>) -> Vec<RetrievalCandidate> {
    let mut table = MergeTable::default();
    for candidate in sets.into_iter().flatten() {
        table.upsert(candidate, |existing, incoming| {
            if incoming.score > existing.score {
                *existing = incoming;
            }
        });
    }
    table.into_ranked()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(content: &str, score: f32) -> RetrievalCandidate {
        RetrievalCandidate::new(content, score)
    }

    #[test]
    fn test_hybrid_weighting() {
        let semantic = vec![candidate("Equivalent fractions", 0.9).field("origin", "semantic")];
        let keyword = vec![candidate("Equivalent fractions", 0.5).field("origin", "keyword")];

        let merged = merge_weighted(vec![(semantic, 0.7), (keyword, 0.3)]);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].score - 0.78).abs() < 1e-6);
        assert_eq!(merged[0].metadata_str("origin"), Some("keyword"));
    }

    #[test]
    fn test_weighted_keeps_disjoint_entries() {
        let merged = merge_weighted(vec![
            (vec![candidate("a", 1.0)], 0.7),
            (vec![candidate("b", 1.0)], 0.3),
        ]);
        let order: Vec<_> = merged.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert!((merged[1].score - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_prefix_dedup() {
        let long_a = format!("{}{}", "x".repeat(DEDUP_KEY_CHARS), " tail one");
        let long_b = format!("{}{}", "x".repeat(DEDUP_KEY_CHARS), " tail two");

        let merged = merge_max(vec![vec![candidate(&long_a, 0.2)], vec![candidate(&long_b, 0.6)]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, long_b);
        assert_eq!(merged[0].score, 0.6);
    }

    #[test]
    fn test_dedup_key_counts_characters() {
        let text = "é".repeat(150);
        assert_eq!(dedup_key(&text).chars().count(), DEDUP_KEY_CHARS);
        assert_eq!(dedup_key("short"), "short");
    }

    #[test]
    fn test_max_keeps_best_metadata() {
        let merged = merge_max(vec![
            vec![candidate("same", 0.4).field("stage", "broad")],
            vec![candidate("same", 0.8).field("stage", "topic")],
            vec![candidate("same", 0.5).field("stage", "group")],
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].score, 0.8);
        assert_eq!(merged[0].metadata_str("stage"), Some("topic"));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let merged = merge_max(vec![
            vec![candidate("first", 0.5), candidate("second", 0.5)],
            vec![candidate("third", 0.5)],
        ]);
        let order: Vec<_> = merged.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_output_never_exceeds_input() {
        let sets = vec![
            vec![candidate("a", 0.1), candidate("b", 0.2), candidate("a", 0.3)],
            vec![candidate("c", 0.4), candidate("b", 0.5)],
            Vec::new(),
        ];
        let total: usize = sets.iter().map(Vec::len).sum();

        let max = merge_max(sets.clone());
        assert!(max.len() <= total);
        assert_eq!(max.len(), 3);

        let weighted = merge_weighted(sets.into_iter().map(|s| (s, 1.0)).collect());
        assert!(weighted.len() <= total);
        assert_eq!(weighted.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_max(Vec::new()).is_empty());
        assert!(merge_weighted(vec![(Vec::new(), 0.7), (Vec::new(), 0.3)]).is_empty());
    }
}
