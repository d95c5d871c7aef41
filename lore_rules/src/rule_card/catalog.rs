//! The rotation catalog - parallel lists of banned sets, tag sets and styles.

use serde::{Deserialize, Serialize};

use super::RuleCard;
use crate::error::ConfigError;

/// Ordered catalog the chapter rule cards rotate through.
///
/// The three lists are parallel: entry `i` of each forms rule card `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCatalog {
    pub banned_word_sets: Vec<Vec<String>>,
    pub required_tag_sets: Vec<Vec<String>>,
    pub style_tags: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self {
            banned_word_sets: vec![
                owned(&["suddenly", "then", "just"]),
                owned(&["very", "really", "quite"]),
                owned(&["actually", "basically", "literally"]),
                owned(&["I", "me", "my", "myself"]),
            ],
            required_tag_sets: vec![
                owned(&["compass", "key", "note"]),
                owned(&["mirror", "clock", "letter"]),
                owned(&["door", "window", "path"]),
                owned(&["voice", "silence", "echo"]),
            ],
            style_tags: owned(&[
                "noir-reportage",
                "magical-realism",
                "stream-of-consciousness",
                "minimalist-prose",
            ]),
        }
    }
}

impl RuleCatalog {
    /// Number of rule cards in the rotation.
    pub fn len(&self) -> usize {
        self.banned_word_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banned_word_sets.is_empty()
    }

    /// Check that the three lists are non-empty and of equal length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.banned_word_sets.len();
        if n == 0 {
            return Err(ConfigError::Invalid("rule catalog is empty".to_string()));
        }
        if self.required_tag_sets.len() != n || self.style_tags.len() != n {
            return Err(ConfigError::Invalid(format!(
                "rule catalog lists differ in length: {} banned sets, {} tag sets, {} styles",
                n,
                self.required_tag_sets.len(),
                self.style_tags.len()
            )));
        }
        Ok(())
    }

    /// Build rule card `index`, wrapping around the catalog length.
    ///
    /// Returns `None` unless the catalog passes [`RuleCatalog::validate`].
    pub fn card(&self, index: usize) -> Option<RuleCard> {
        self.validate().ok()?;
        let i = index % self.len();
        Some(RuleCard {
            banned_words: self.banned_word_sets[i].clone(),
            required_tags: self.required_tag_sets[i].clone(),
            style_tag: self.style_tags[i].clone(),
        })
    }

    /// Locate the catalog entry whose banned set a rule card carries.
    ///
    /// An entry identical to the card's banned list wins; otherwise the first
    /// entry whose words all appear on the card is used.
    pub fn position_of(&self, card: &RuleCard) -> Option<usize> {
        self.banned_word_sets
            .iter()
            .position(|set| *set == card.banned_words)
            .or_else(|| {
                self.banned_word_sets
                    .iter()
                    .position(|set| card.bans_all(set))
            })
    }
}
