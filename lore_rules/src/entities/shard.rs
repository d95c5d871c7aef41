//! Shard definitions - single contributions in the branching tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ShardId, StoryId};

/// Number of characters shown in a shard preview before truncation.
pub const PREVIEW_CHARS: usize = 80;

/// One author's text addition to the branching narrative tree.
///
/// The text is fixed at submission. Only `votes`, `hidden` and `frozen` change
/// afterwards, through voting and moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    pub id: ShardId,
    pub story_id: StoryId,

    /// Absent for the root of the tree.
    #[serde(default)]
    pub parent_id: Option<ShardId>,

    pub text: String,
    pub author_name: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,

    /// Net approval; may go negative.
    #[serde(default)]
    pub votes: i64,

    /// Hidden shards and their whole subtree never reach a canonical path.
    #[serde(default)]
    pub hidden: bool,

    /// Frozen shards accept no new children.
    #[serde(default)]
    pub frozen: bool,

    /// Rule violations recorded when the shard was created.
    #[serde(default)]
    pub violations: Vec<String>,
}

impl Shard {
    /// Create a new root shard in the given story.
    pub fn new(story_id: StoryId, text: impl Into<String>) -> Self {
        Self {
            id: ShardId::new(),
            story_id,
            parent_id: None,
            text: text.into(),
            author_name: String::new(),
            author_id: String::new(),
            created_at: Utc::now(),
            votes: 0,
            hidden: false,
            frozen: false,
            violations: Vec::new(),
        }
    }

    /// Set the shard ID.
    pub fn with_id(mut self, id: ShardId) -> Self {
        self.id = id;
        self
    }

    /// Attach this shard under a parent.
    pub fn with_parent(mut self, parent: ShardId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Set the author display name and identifier.
    pub fn with_author(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.author_name = name.into();
        self.author_id = id.into();
        self
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the approval score.
    pub fn with_votes(mut self, votes: i64) -> Self {
        self.votes = votes;
        self
    }

    /// Set the hidden flag.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the frozen flag.
    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Record violations found at submission time.
    pub fn with_violations(mut self, violations: impl IntoIterator<Item = String>) -> Self {
        self.violations.extend(violations);
        self
    }

    /// Check if this shard is a root (has no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if new shards may be attached below this one.
    pub fn accepts_children(&self) -> bool {
        !self.hidden && !self.frozen
    }

    /// Apply a vote delta and return the new score.
    pub fn apply_vote(&mut self, delta: i64) -> i64 {
        self.votes = self.votes.saturating_add(delta);
        self.votes
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Short preview of the text for list views.
    pub fn preview(&self) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }

    /// Build a list-view summary of this shard.
    pub fn summary(&self, has_children: bool) -> ShardSummary {
        ShardSummary {
            id: self.id,
            preview: self.preview(),
            author_name: self.author_name.clone(),
            votes: self.votes,
            created_at: self.created_at,
            has_children,
        }
    }
}

/// Condensed view of a shard for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardSummary {
    pub id: ShardId,
    pub preview: String,
    pub author_name: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub has_children: bool,
}
