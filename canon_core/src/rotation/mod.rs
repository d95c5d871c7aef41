//! Rule rotation - derives the next chapter's rule card from the current one.
//!
//! The next card is a pure function of the current card and the catalog.
//! Banned set, tag set and style always advance together, keyed on the
//! banned set alone.

use lore_rules::{RuleCard, RuleCatalog};

/// Produce the rule card for the next chapter.
///
/// The current card is located by its banned words (exact entry first, then
/// the first entry fully contained in it). A card matching entry `i` advances
/// to entry `i + 1`, wrapping around; an unrecognized card starts over at
/// entry 0. An empty or malformed catalog leaves the card unchanged.
pub fn rotate_rule_card(current: &RuleCard, catalog: &RuleCatalog) -> RuleCard {
    let next = catalog
        .position_of(current)
        .map(|i| (i + 1) % catalog.len())
        .unwrap_or(0);

    catalog.card(next).unwrap_or_else(|| current.clone())
}

/// Rotate with the built-in catalog.
pub fn rotate_rule_card_default(current: &RuleCard) -> RuleCard {
    rotate_rule_card(current, &RuleCatalog::default())
}
