//! Canonical composer - stitches a path's shards into one flowing chapter.

use chrono::{DateTime, Utc};
use lore_rules::Shard;

/// Openers that keep their capital letter when they continue a sentence.
const TRANSITIONS: &[&str] = &["But", "However", "Yet"];

/// Opening quotation marks that mark dialogue.
const OPENING_QUOTES: &[char] = &['"', '\u{201C}'];

const TITLE_MAX_CHARS: usize = 50;
const TITLE_WORDS: usize = 4;

/// Join a path's shard texts into the canonical chapter text.
///
/// The first text is trimmed and used as is. Every following text is trimmed
/// and joined with a single space; its first letter is lower-cased unless it
/// opens with a quotation mark or a transition word.
pub fn compose_canonical_text(shards: &[Shard]) -> String {
    let mut out = String::new();

    for (i, shard) in shards.iter().enumerate() {
        let text = shard.text.trim();
        if i == 0 {
            out.push_str(text);
            continue;
        }

        out.push(' ');
        if keeps_case(text) {
            out.push_str(text);
        } else {
            let mut chars = text.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_lowercase());
                out.push_str(chars.as_str());
            }
        }
    }

    out
}

fn keeps_case(text: &str) -> bool {
    text.starts_with(OPENING_QUOTES) || TRANSITIONS.iter().any(|t| text.starts_with(*t))
}

/// Derive a short chapter title from the canonical text.
///
/// Uses the first sentence: cut to 50 characters plus `...` when longer,
/// otherwise its first four words. A first sentence of fewer than three
/// words falls back to the date.
pub fn chapter_title(text: &str, date: DateTime<Utc>) -> String {
    let first_sentence = text
        .split(|c: char| matches!(c, '.' | '!' | '?'))
        .next()
        .unwrap_or_default()
        .trim();

    if first_sentence.chars().count() > TITLE_MAX_CHARS {
        let head: String = first_sentence.chars().take(TITLE_MAX_CHARS).collect();
        return format!("{}...", head);
    }

    let words: Vec<&str> = first_sentence.split_whitespace().collect();
    if words.len() >= 3 {
        return words
            .iter()
            .take(TITLE_WORDS)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
    }

    format!("Chapter {}", date.format("%Y-%m-%d"))
}
