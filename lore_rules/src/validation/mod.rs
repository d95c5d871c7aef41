//! Text validation - checks a shard's text against a rule card.
//!
//! Validation failure is an ordinary result, never an error: the caller gets
//! the list of violations and decides what to do with it.

mod normalize;

pub use normalize::*;

use serde::{Deserialize, Serialize};

use crate::rule_card::RuleCard;

/// Note appended to a shard's recorded violations when it trips the profanity list.
pub const PROFANITY_VIOLATION: &str = "Contains inappropriate content";

const PROFANE_WORDS: &[&str] = &[
    "fuck", "shit", "damn", "bitch", "asshole", "cunt", "nigger", "fag",
];

/// Inclusive bounds on the raw character length of a shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for LengthLimits {
    fn default() -> Self {
        Self {
            min_chars: 200,
            max_chars: 300,
        }
    }
}

/// Outcome of validating a text against a rule card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

/// Validate a shard's text.
///
/// Checks run in a fixed order and each adds at most one message:
/// 1. every banned word found as a substring of the normalized text
/// 2. none of the required tags present (only when the card has tags)
/// 3. raw character count below the minimum, then above the maximum
///
/// Banned words are matched inside longer words too: "then" is found in
/// "strengthen".
pub fn validate_shard_text(
    text: &str,
    rule_card: &RuleCard,
    limits: &LengthLimits,
) -> ValidationResult {
    let mut violations = Vec::new();
    let normalized = normalize_text(text);

    for banned in &rule_card.banned_words {
        if normalized.contains(normalize_text(banned).as_str()) {
            violations.push(format!("Contains banned word: \"{}\"", banned));
        }
    }

    if rule_card.has_required_tags() {
        let has_required = rule_card
            .required_tags
            .iter()
            .any(|tag| normalized.contains(normalize_text(tag).as_str()));
        if !has_required {
            violations.push(format!(
                "Must include one of: {}",
                rule_card.required_tags.join(", ")
            ));
        }
    }

    let length = text.chars().count();
    if length < limits.min_chars {
        violations.push(format!(
            "Text must be at least {} characters",
            limits.min_chars
        ));
    }
    if length > limits.max_chars {
        violations.push(format!(
            "Text must be no more than {} characters",
            limits.max_chars
        ));
    }

    ValidationResult::from_violations(violations)
}

/// Validate with the default 200..=300 character limits.
pub fn validate_shard_text_default(text: &str, rule_card: &RuleCard) -> ValidationResult {
    validate_shard_text(text, rule_card, &LengthLimits::default())
}

/// Check the text against the fixed profanity list.
pub fn is_profane(text: &str) -> bool {
    let normalized = normalize_text(text);
    PROFANE_WORDS.iter().any(|word| normalized.contains(word))
}
