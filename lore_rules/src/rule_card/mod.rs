//! Rule cards - the per-chapter constraints every shard is checked against.
//!
//! A rule card bans some words, requires at least one of a set of tags, and
//! names a style. The style is shown to writers but never interpreted here.

mod catalog;

pub use catalog::*;

use serde::{Deserialize, Serialize};

/// Constraints attached to one chapter. Immutable once the chapter exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleCard {
    /// Words that may not appear (substring match after normalization).
    pub banned_words: Vec<String>,

    /// At least one of these must appear when the list is non-empty.
    #[serde(default)]
    pub required_tags: Vec<String>,

    /// Opaque style label.
    #[serde(default)]
    pub style_tag: String,
}

impl RuleCard {
    /// Create a new rule card.
    pub fn new<B, R>(
        banned_words: impl IntoIterator<Item = B>,
        required_tags: impl IntoIterator<Item = R>,
        style_tag: impl Into<String>,
    ) -> Self
    where
        B: Into<String>,
        R: Into<String>,
    {
        Self {
            banned_words: banned_words.into_iter().map(Into::into).collect(),
            required_tags: required_tags.into_iter().map(Into::into).collect(),
            style_tag: style_tag.into(),
        }
    }

    /// Check if a word is on the banned list (exact entry match).
    pub fn bans(&self, word: &str) -> bool {
        self.banned_words.iter().any(|w| w == word)
    }

    /// Check if every word of `words` is on the banned list.
    pub fn bans_all<S: AsRef<str>>(&self, words: &[S]) -> bool {
        words.iter().all(|w| self.bans(w.as_ref()))
    }

    /// Check if the card requires any tag at all.
    pub fn has_required_tags(&self) -> bool {
        !self.required_tags.is_empty()
    }
}

impl std::fmt::Display for RuleCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "banned [{}], require one of [{}], style {}",
            self.banned_words.join(", "),
            self.required_tags.join(", "),
            self.style_tag
        )
    }
}
