//! # LoreWeave Rules
//!
//! The rulebook crate: the data model of the branching story, the rule cards
//! that constrain each chapter, and the text validator that gates submissions.
//! It holds no canonization logic and performs no I/O.

pub mod config;
pub mod entities;
pub mod error;
pub mod rule_card;
pub mod submission;
pub mod validation;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use rule_card::*;
pub use submission::*;
pub use validation::*;
