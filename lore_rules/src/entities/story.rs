//! Story chapters - one chapter of the shared narrative and its rule card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ShardId, StoryId};
use crate::rule_card::RuleCard;

/// A chapter of the story.
///
/// A new chapter is created at every canonization; earlier chapters are kept
/// and linked only through `previous_chapter_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,

    /// Chapter number, starting at 1.
    pub chapter: u32,

    /// Constraints every shard in this chapter is validated against.
    pub rule_card: RuleCard,

    /// When contributions close and the chapter is canonized.
    pub ends_at: DateTime<Utc>,

    pub title: String,
    pub created_at: DateTime<Utc>,

    /// Community the chapter is posted to.
    pub subreddit: String,

    pub author_name: String,

    #[serde(default)]
    pub root_shard_id: Option<ShardId>,

    #[serde(default)]
    pub previous_chapter_id: Option<StoryId>,
}

impl Story {
    /// Create a new chapter with the given number and rule card.
    pub fn new(chapter: u32, rule_card: RuleCard) -> Self {
        let now = Utc::now();
        Self {
            id: StoryId::new(),
            chapter,
            rule_card,
            ends_at: now,
            title: String::new(),
            created_at: now,
            subreddit: String::new(),
            author_name: String::new(),
            root_shard_id: None,
            previous_chapter_id: None,
        }
    }

    pub fn with_id(mut self, id: StoryId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subreddit(mut self, subreddit: impl Into<String>) -> Self {
        self.subreddit = subreddit.into();
        self
    }

    pub fn with_author(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = author_name.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.ends_at = ends_at;
        self
    }

    pub fn with_root_shard(mut self, root: ShardId) -> Self {
        self.root_shard_id = Some(root);
        self
    }

    pub fn with_previous_chapter(mut self, previous: StoryId) -> Self {
        self.previous_chapter_id = Some(previous);
        self
    }

    /// Check if contributions are still open at the given instant.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        now < self.ends_at
    }
}
