//! Narrative paths - complete root-to-leaf runs through the shard tree.

use lore_rules::{Shard, ShardId};
use serde::{Deserialize, Serialize};

/// An ordered run of visible shards from the root to a leaf, with the scores
/// the ranking pass fills in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativePath {
    pub shards: Vec<Shard>,
    pub total_votes: i64,
    pub novelty_score: f64,
    pub diversity_score: f64,
    pub penalty_score: f64,
    pub final_score: f64,
}

impl NarrativePath {
    /// Create an unscored path.
    pub fn new(shards: Vec<Shard>) -> Self {
        Self {
            shards,
            total_votes: 0,
            novelty_score: 0.0,
            diversity_score: 0.0,
            penalty_score: 0.0,
            final_score: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Sum of the shards' approval scores, saturating at the `i64` bounds.
    pub fn vote_sum(&self) -> i64 {
        self.shards
            .iter()
            .fold(0i64, |acc, s| acc.saturating_add(s.votes))
    }

    /// Number of violations recorded on the shards at submission time.
    pub fn violation_count(&self) -> usize {
        self.shards.iter().map(|s| s.violations.len()).sum()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.shards.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn author_names(&self) -> Vec<&str> {
        self.shards.iter().map(|s| s.author_name.as_str()).collect()
    }

    pub fn shard_ids(&self) -> Vec<ShardId> {
        self.shards.iter().map(|s| s.id).collect()
    }

    /// The last shard of the path.
    pub fn leaf(&self) -> Option<&Shard> {
        self.shards.last()
    }

    /// Check if a shard lies on this path.
    pub fn contains(&self, id: ShardId) -> bool {
        self.shards.iter().any(|s| s.id == id)
    }
}
