//! Lexical signals - novelty of a path's wording and diversity of its authors.

use std::collections::HashSet;

use lore_rules::normalize_text;

/// Words ignored by the novelty score. The list is fixed so scores stay
/// reproducible across releases.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "were", "will", "with", "the", "this", "but",
    "they", "have", "had", "what", "said", "each", "which", "she", "do", "how", "their", "if",
    "up", "out", "many", "then", "them", "these", "so", "some", "her", "would", "make", "like",
    "into", "him", "time", "two", "more", "go", "no", "way", "could", "my", "than", "first",
    "been", "call", "who", "its", "now", "find", "long", "down", "day", "did", "get", "come",
    "made", "may", "part",
];

/// Tokens this short or shorter never count toward novelty.
pub const MIN_TOKEN_LEN: usize = 2;

/// Check if a normalized token counts toward novelty.
pub fn is_qualifying_token(token: &str) -> bool {
    token.len() > MIN_TOKEN_LEN && !STOPWORDS.contains(&token)
}

/// Share of qualifying tokens that were new when first met.
///
/// Every distinct token is new the first time it is seen, so the ratio is
/// 1.0 whenever any qualifying token exists and 0.0 otherwise.
pub fn novelty_score<S: AsRef<str>>(texts: &[S]) -> f64 {
    let mut all_seen: HashSet<String> = HashSet::new();
    let mut first_seen: HashSet<String> = HashSet::new();

    for text in texts {
        let normalized = normalize_text(text.as_ref());
        for token in normalized.split(' ').filter(|t| is_qualifying_token(t)) {
            if !all_seen.contains(token) {
                first_seen.insert(token.to_string());
            }
            all_seen.insert(token.to_string());
        }
    }

    if all_seen.is_empty() {
        0.0
    } else {
        first_seen.len() as f64 / all_seen.len() as f64
    }
}

/// Distinct authors divided by entries. An empty input scores 0.0.
pub fn diversity_score<S: AsRef<str>>(authors: &[S]) -> f64 {
    if authors.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = authors.iter().map(|a| a.as_ref()).collect();
    distinct.len() as f64 / authors.len() as f64
}
