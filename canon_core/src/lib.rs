//! # Canon Core (The Canonization Engine)
//!
//! Collapses a chapter's branching shard tree into one canonical text. This
//! crate reads the data model from `lore_rules`, ranks every complete
//! narrative, and drafts the next chapter.
//!
//! ## Core Components
//!
//! - **tree**: Rebuilds the shard tree and enumerates root-to-leaf paths
//! - **lexical**: Novelty and author-diversity signals
//! - **scoring**: Weighted ranking of narrative paths
//! - **composer**: Renders the winning path as chapter text
//! - **rotation**: Derives the next chapter's rule card
//! - **canonize**: The end-to-end pass
//!
//! ## Design Philosophy
//!
//! - **Pure**: No storage or network access; the caller supplies a snapshot
//!   and publishes the outcome
//! - **Deterministic**: The same snapshot always yields the same chapter
//! - **Stateless**: Rotation and scoring depend only on their inputs

pub mod canonize;
pub mod composer;
pub mod config;
pub mod error;
pub mod lexical;
pub mod rotation;
pub mod scoring;
pub mod tree;

pub use canonize::*;
pub use composer::*;
pub use config::*;
pub use error::*;
pub use lexical::*;
pub use rotation::*;
pub use scoring::*;
pub use tree::*;
