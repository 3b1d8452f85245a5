//! Word tokenization shared by the embedder, BM25 and the cross-encoder.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD_REGEX: Regex =
        Regex::new(r"[\p{L}\p{N}]+(?:['-][\p{L}\p{N}]+)*").expect("word pattern is valid");
}

/// Lower-cased word tokens in text order.
///
/// Hyphenated and apostrophe words ("hands-on", "student's") stay whole.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Distinct lower-cased word tokens.
pub fn term_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
