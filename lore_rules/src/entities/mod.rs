//! Entity definitions for the shard tree: identifiers, shards, and chapters.

mod shard;
mod story;

pub use shard::*;
pub use story::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shard (one contribution in the tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShardId(pub Uuid);

impl ShardId {
    /// Create a new random shard ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a shard ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty shard ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for ShardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a story chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryId(pub Uuid);

impl StoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Deterministic ID for the chapter that follows this one.
    ///
    /// Recomputing a canonization from the same snapshot yields the same ID.
    pub fn successor(&self, chapter: u32) -> Self {
        Self(Uuid::new_v5(&self.0, chapter.to_string().as_bytes()))
    }
}

impl Default for StoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the engine needs for one canonization pass: the chapter and
/// the full set of shards attached to it, read once from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSnapshot {
    pub story: Story,
    #[serde(default)]
    pub shards: Vec<Shard>,
}

impl ChapterSnapshot {
    pub fn new(story: Story, shards: Vec<Shard>) -> Self {
        Self { story, shards }
    }

    /// Parse a snapshot from a JSON blob.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot back to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Shards whose story id does not match the chapter are dropped.
    pub fn shards_for_story(&self) -> impl Iterator<Item = &Shard> {
        self.shards.iter().filter(move |s| s.story_id == self.story.id)
    }
}
