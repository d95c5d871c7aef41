//! Shard tree - rebuilds the branching story from flat parent pointers and
//! enumerates every complete narrative.
//!
//! The tree is an arena of shards plus a parent -> children index built once
//! per pass. Enumeration walks it depth-first with an explicit work stack, so
//! deep trees never hit a recursion limit.

mod path;

pub use path::*;

use std::collections::HashMap;

use lore_rules::{Shard, ShardId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CanonError;

/// Default cap on enumerated paths.
pub const DEFAULT_MAX_PATHS: usize = 10_000;

/// How to pick the root when more than one shard has no parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Earliest `created_at`; ties go to the shard listed first.
    #[default]
    EarliestCreated,
    /// Refuse to canonize.
    Strict,
}

/// Arena-backed view of one chapter's shards.
#[derive(Debug, Clone)]
pub struct ShardTree {
    /// All shards, in input order.
    shards: Vec<Shard>,

    /// Index: shard ID -> arena slot.
    index: HashMap<ShardId, usize>,

    /// Children of each slot in attachment order.
    children: Vec<Vec<usize>>,

    root: usize,
}

impl ShardTree {
    /// Build the tree from a chapter's complete shard set.
    ///
    /// Children are ordered by creation time, then by input position. Shards
    /// whose parent is not in the set are unreachable and never appear in a
    /// path.
    pub fn build(shards: &[Shard], policy: RootPolicy) -> Result<Self, CanonError> {
        let mut arena: Vec<Shard> = Vec::with_capacity(shards.len());
        let mut index: HashMap<ShardId, usize> = HashMap::with_capacity(shards.len());

        for shard in shards {
            if index.contains_key(&shard.id) {
                warn!(shard_id = %shard.id, "duplicate shard id, keeping first occurrence");
                continue;
            }
            index.insert(shard.id, arena.len());
            arena.push(shard.clone());
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
        let mut roots: Vec<usize> = Vec::new();
        let mut orphans = 0usize;

        for (slot, shard) in arena.iter().enumerate() {
            match shard.parent_id {
                None => roots.push(slot),
                Some(parent) => match index.get(&parent) {
                    Some(&parent_slot) if parent_slot != slot => children[parent_slot].push(slot),
                    _ => orphans += 1,
                },
            }
        }

        for kids in &mut children {
            kids.sort_by_key(|&slot| arena[slot].created_at);
        }

        if orphans > 0 {
            debug!(orphans, "shards with a missing parent are unreachable");
        }

        let root = Self::pick_root(&arena, &roots, policy)?;

        Ok(Self {
            shards: arena,
            index,
            children,
            root,
        })
    }

    fn pick_root(
        arena: &[Shard],
        roots: &[usize],
        policy: RootPolicy,
    ) -> Result<usize, CanonError> {
        match roots {
            [] => Err(CanonError::NoRoot),
            [only] => Ok(*only),
            many => {
                if policy == RootPolicy::Strict {
                    return Err(CanonError::AmbiguousRoot { count: many.len() });
                }
                // min_by_key keeps the first of equal keys
                let chosen = many
                    .iter()
                    .copied()
                    .min_by_key(|&slot| arena[slot].created_at)
                    .ok_or(CanonError::NoRoot)?;
                warn!(
                    roots = many.len(),
                    chosen = %arena[chosen].id,
                    "multiple root shards, using the earliest"
                );
                Ok(chosen)
            }
        }
    }

    /// The chosen root shard.
    pub fn root(&self) -> &Shard {
        &self.shards[self.root]
    }

    /// Get a shard by ID.
    pub fn get(&self, id: ShardId) -> Option<&Shard> {
        self.index.get(&id).map(|&slot| &self.shards[slot])
    }

    /// Direct children of a shard in attachment order, hidden ones included.
    pub fn children_of(&self, id: ShardId) -> Vec<&Shard> {
        self.index
            .get(&id)
            .map(|&slot| self.children[slot].iter().map(|&c| &self.shards[c]).collect())
            .unwrap_or_default()
    }

    /// Number of distinct shards in the arena.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    fn visible_children(&self, slot: usize) -> Vec<usize> {
        self.children[slot]
            .iter()
            .copied()
            .filter(|&c| !self.shards[c].hidden)
            .collect()
    }

    /// Enumerate every root-to-leaf path of visible shards, in depth-first
    /// discovery order.
    ///
    /// A hidden shard ends the walk at that point: neither it nor anything
    /// below it is part of any path. A shard whose children are all hidden
    /// is a leaf. Enumeration stops once `max_paths` paths were produced;
    /// `None` and `Some(0)` both mean no cap.
    pub fn enumerate_paths(&self, max_paths: Option<usize>) -> Vec<NarrativePath> {
        let max_paths = max_paths.filter(|&limit| limit > 0);
        let mut paths = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut stack: Vec<(usize, usize)> = vec![(self.root, 0)];

        while let Some((slot, depth)) = stack.pop() {
            if self.shards[slot].hidden {
                continue;
            }

            current.truncate(depth);
            current.push(slot);

            let visible = self.visible_children(slot);
            if visible.is_empty() {
                let shards = current.iter().map(|&s| self.shards[s].clone()).collect();
                paths.push(NarrativePath::new(shards));

                if let Some(limit) = max_paths {
                    if paths.len() >= limit {
                        if !stack.is_empty() {
                            warn!(limit, "path limit reached, enumeration truncated");
                        }
                        break;
                    }
                }
            } else {
                // Reversed so the first child is popped first.
                for &child in visible.iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }

        debug!(paths = paths.len(), shards = self.shards.len(), "enumerated narrative paths");
        paths
    }
}

/// Build a tree with the default root policy and enumerate it with the
/// default path cap.
pub fn enumerate_paths(shards: &[Shard]) -> Result<Vec<NarrativePath>, CanonError> {
    let tree = ShardTree::build(shards, RootPolicy::default())?;
    Ok(tree.enumerate_paths(Some(DEFAULT_MAX_PATHS)))
}
