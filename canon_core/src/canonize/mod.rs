//! Canonization - one full pass from a chapter snapshot to the next chapter.
//!
//! The pass works as follows:
//! 1. **Build**: rebuild the shard tree from parent pointers
//! 2. **Enumerate**: list every root-to-leaf path of visible shards
//! 3. **Score**: rank the paths and take the best
//! 4. **Compose**: render the winning path as one text
//! 5. **Rotate**: derive the next rule card
//! 6. **Draft**: describe the next chapter for the caller to publish
//!
//! Nothing here touches storage. The same snapshot always produces the same
//! outcome, so a pass whose publishing step failed can simply be rerun.

use chrono::{DateTime, Duration, Utc};
use lore_rules::{ChapterSnapshot, RuleCard, Shard, Story};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::composer::{chapter_title, compose_canonical_text};
use crate::config::CanonConfig;
use crate::error::CanonError;
use crate::rotation::rotate_rule_card;
use crate::scoring::score_paths;
use crate::tree::{NarrativePath, ShardTree};

/// Footer appended to the published chapter post.
pub const COMMUNITY_FOOTER: &str =
    "*This chapter was collaboratively written by the LoreWeave community.*";

/// Result of a successful canonization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonizationOutcome {
    /// The winning path.
    pub selected: NarrativePath,

    /// Every enumerated path, best first.
    pub ranked: Vec<NarrativePath>,

    /// The winning path rendered as one text.
    pub canonical_text: String,

    /// Rule card for the next chapter.
    pub next_rule_card: RuleCard,

    /// The chapter that replaces the canonized one.
    pub next_story: Story,
}

impl CanonizationOutcome {
    /// Body of the post that publishes the chapter.
    pub fn post_body(&self) -> String {
        format!("{}\n\n---\n\n{}", self.canonical_text, COMMUNITY_FOOTER)
    }
}

/// Runs canonization passes with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Canonizer {
    config: CanonConfig,
}

impl Canonizer {
    /// Create a new canonizer, rejecting an invalid configuration.
    pub fn new(config: CanonConfig) -> Result<Self, CanonError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a canonizer with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: CanonConfig::default(),
        }
    }

    /// Create a canonizer from a TOML configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, CanonError> {
        Self::new(CanonConfig::from_toml_str(content)?)
    }

    pub fn config(&self) -> &CanonConfig {
        &self.config
    }

    /// Build, enumerate and rank the paths of one chapter's shards.
    pub fn rank_paths(&self, shards: &[Shard]) -> Result<Vec<NarrativePath>, CanonError> {
        let tree = ShardTree::build(shards, self.config.root_policy)?;
        let paths = tree.enumerate_paths(self.config.path_limit());
        if paths.is_empty() {
            return Err(CanonError::EmptyPathSet);
        }
        Ok(score_paths(paths, &self.config.weights))
    }

    /// Canonize a chapter.
    ///
    /// `shards` must be one consistent snapshot of the chapter; shards that
    /// belong to other stories are ignored. `now` stamps the next chapter.
    pub fn canonize(
        &self,
        story: &Story,
        shards: &[Shard],
        now: DateTime<Utc>,
    ) -> Result<CanonizationOutcome, CanonError> {
        let snapshot = ChapterSnapshot::new(story.clone(), shards.to_vec());
        self.canonize_snapshot(&snapshot, now)
    }

    /// Canonize a loaded snapshot.
    pub fn canonize_snapshot(
        &self,
        snapshot: &ChapterSnapshot,
        now: DateTime<Utc>,
    ) -> Result<CanonizationOutcome, CanonError> {
        let story = &snapshot.story;
        let shards = &snapshot.shards;
        let own: Vec<Shard> = snapshot.shards_for_story().cloned().collect();
        if own.len() != shards.len() {
            debug!(
                ignored = shards.len() - own.len(),
                "ignoring shards from other stories"
            );
        }

        info!(
            story_id = %story.id,
            chapter = story.chapter,
            shards = own.len(),
            "canonizing chapter"
        );

        let ranked = match self.rank_paths(&own) {
            Ok(ranked) => ranked,
            Err(err) => {
                info!(story_id = %story.id, error = %err, "canonization skipped");
                return Err(err);
            }
        };
        let selected = ranked.first().cloned().ok_or(CanonError::EmptyPathSet)?;

        info!(
            score = selected.final_score,
            shards = selected.len(),
            "selected canonical path"
        );

        let canonical_text = compose_canonical_text(&selected.shards);
        let next_rule_card = rotate_rule_card(&story.rule_card, &self.config.rules.catalog);
        let next_story = self.draft_next_story(story, &canonical_text, next_rule_card.clone(), now);

        Ok(CanonizationOutcome {
            selected,
            ranked,
            canonical_text,
            next_rule_card,
            next_story,
        })
    }

    fn draft_next_story(
        &self,
        current: &Story,
        canonical_text: &str,
        rule_card: RuleCard,
        now: DateTime<Utc>,
    ) -> Story {
        let chapter = current.chapter.saturating_add(1);
        let title = format!(
            "{} Chapter {}: {}",
            self.config.title_prefix,
            chapter,
            chapter_title(canonical_text, now)
        );
        let ends_at = self
            .config
            .schedule
            .next_close_after(now)
            .unwrap_or(now + Duration::days(1));

        Story::new(chapter, rule_card)
            .with_id(current.id.successor(chapter))
            .with_title(title)
            .with_subreddit(current.subreddit.clone())
            .with_author(self.config.bot_name.clone())
            .with_created_at(now)
            .with_ends_at(ends_at)
            .with_previous_chapter(current.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RootPolicy;
    use chrono::TimeZone;
    use lore_rules::RuleCatalog;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 23, 55, 0).unwrap()
    }

    fn story() -> Story {
        Story::new(1, RuleCatalog::default().card(0).unwrap())
            .with_title("LoreWeave Chapter 1: The Beginning")
            .with_subreddit("lorecolab")
            .with_author("LoreWeaveBot")
    }

    fn shard(
        story: &Story,
        parent: Option<&Shard>,
        text: &str,
        author: &str,
        votes: i64,
        minute: i64,
    ) -> Shard {
        let created =
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap() + Duration::minutes(minute);
        let mut shard = Shard::new(story.id, text)
            .with_author(author, author)
            .with_votes(votes)
            .with_created_at(created);
        if let Some(parent) = parent {
            shard = shard.with_parent(parent.id);
        }
        shard
    }

    fn branching(story: &Story) -> Vec<Shard> {
        let root = shard(story, None, "The compass spun wildly over the map.", "ana", 3, 0);
        let weak = shard(story, Some(&root), "Nobody noticed the rain.", "ben", 0, 1);
        let strong = shard(story, Some(&root), "A brass key fell from the lining.", "cy", 8, 2);
        let coda = shard(story, Some(&strong), "But the note inside was blank.", "dee", 2, 3);
        vec![root, weak, strong, coda]
    }

    #[test]
    fn test_canonize_selects_best_path() {
        let story = story();
        let outcome = Canonizer::with_defaults()
            .canonize(&story, &branching(&story), now())
            .unwrap();

        assert_eq!(outcome.ranked.len(), 2);
        assert_eq!(outcome.selected.len(), 3);
        assert_eq!(
            outcome.canonical_text,
            "The compass spun wildly over the map. a brass key fell from the lining. But the note inside was blank."
        );
    }

    #[test]
    fn test_canonize_drafts_next_chapter() {
        let story = story();
        let outcome = Canonizer::with_defaults()
            .canonize(&story, &branching(&story), now())
            .unwrap();
        let next = &outcome.next_story;

        assert_eq!(next.chapter, 2);
        assert_eq!(next.title, "LoreWeave Chapter 2: The compass spun wildly");
        assert_eq!(next.subreddit, "lorecolab");
        assert_eq!(next.author_name, "LoreWeaveBot");
        assert_eq!(next.previous_chapter_id, Some(story.id));
        assert_eq!(next.created_at, now());
        assert_eq!(next.ends_at, Utc.with_ymd_and_hms(2024, 3, 2, 23, 50, 0).unwrap());
        assert_eq!(next.rule_card, RuleCatalog::default().card(1).unwrap());
        assert_eq!(outcome.next_rule_card, next.rule_card);
    }

    #[test]
    fn test_canonize_is_repeatable() {
        let story = story();
        let shards = branching(&story);
        let canonizer = Canonizer::with_defaults();

        let first = canonizer.canonize(&story, &shards, now()).unwrap();
        let second = canonizer.canonize(&story, &shards, now()).unwrap();

        assert_eq!(first.canonical_text, second.canonical_text);
        assert_eq!(first.next_story, second.next_story);
        assert_eq!(first.selected.shard_ids(), second.selected.shard_ids());
    }

    #[test]
    fn test_canonize_ignores_foreign_shards() {
        let story = story();
        let other = Story::new(1, RuleCard::default());
        let mut shards = branching(&story);
        shards.push(shard(&other, None, "Elsewhere entirely.", "zed", 100, 0));

        let outcome = Canonizer::with_defaults().canonize(&story, &shards, now()).unwrap();
        assert!(outcome.canonical_text.starts_with("The compass"));
    }

    #[test]
    fn test_all_hidden_is_empty_path_set() {
        let story = story();
        let shards: Vec<_> = branching(&story).into_iter().map(|s| s.with_hidden(true)).collect();

        let err = Canonizer::with_defaults().canonize(&story, &shards, now()).unwrap_err();
        assert!(matches!(err, CanonError::EmptyPathSet));
        assert!(err.skips_chapter());
    }

    #[test]
    fn test_no_shards_is_no_root() {
        let story = story();
        let err = Canonizer::with_defaults().canonize(&story, &[], now()).unwrap_err();
        assert!(matches!(err, CanonError::NoRoot));
    }

    #[test]
    fn test_strict_root_policy() {
        let story = story();
        let mut shards = branching(&story);
        shards.push(shard(&story, None, "A second beginning.", "eve", 0, 9));

        let config = CanonConfig {
            root_policy: RootPolicy::Strict,
            ..CanonConfig::default()
        };
        let err = Canonizer::new(config)
            .unwrap()
            .canonize(&story, &shards, now())
            .unwrap_err();
        assert!(matches!(err, CanonError::AmbiguousRoot { count: 2 }));

        let lenient = Canonizer::with_defaults().canonize(&story, &shards, now()).unwrap();
        assert!(lenient.canonical_text.starts_with("The compass"));
    }

    #[test]
    fn test_post_body() {
        let story = story();
        let outcome = Canonizer::with_defaults()
            .canonize(&story, &branching(&story), now())
            .unwrap();

        let body = outcome.post_body();
        assert!(body.starts_with(&outcome.canonical_text));
        assert!(body.ends_with(COMMUNITY_FOOTER));
    }

    #[test]
    fn test_outcome_serializes_for_the_store() {
        let story = story();
        let outcome = Canonizer::with_defaults()
            .canonize(&story, &branching(&story), now())
            .unwrap();

        let json = serde_json::to_string(&outcome).unwrap();
        let restored: CanonizationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.canonical_text, outcome.canonical_text);
        assert_eq!(restored.next_story, outcome.next_story);
        assert_eq!(restored.selected.shard_ids(), outcome.selected.shard_ids());
    }

    #[test]
    fn test_canonize_snapshot() {
        let story = story();
        let snapshot = ChapterSnapshot::new(story.clone(), branching(&story));
        let outcome = Canonizer::with_defaults().canonize_snapshot(&snapshot, now()).unwrap();
        assert_eq!(outcome.next_story.chapter, 2);
    }

    #[test]
    fn test_new_rejects_mismatched_catalog() {
        let mut config = CanonConfig::default();
        config.rules.catalog.required_tag_sets.pop();
        config.rules.catalog.style_tags.pop();

        assert!(matches!(Canonizer::new(config), Err(CanonError::Config(_))));
        assert!(Canonizer::new(CanonConfig::default()).is_ok());
    }

    #[test]
    fn test_last_chapter_number_does_not_overflow() {
        let mut story = story();
        story.chapter = u32::MAX;
        let shards = branching(&story);

        let outcome = Canonizer::with_defaults().canonize(&story, &shards, now()).unwrap();
        assert_eq!(outcome.next_story.chapter, u32::MAX);
    }

    #[test]
    fn test_from_toml() {
        let canonizer = Canonizer::from_toml_str("title_prefix = \"Tales\"\n").unwrap();
        assert_eq!(canonizer.config().title_prefix, "Tales");

        assert!(matches!(
            Canonizer::from_toml_str("max_paths = \"many\""),
            Err(CanonError::Config(_))
        ));
    }
}
