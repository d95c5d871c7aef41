use lore_rules::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanonError {
    #[error("no root shard found")]
    NoRoot,

    #[error("{count} root shards found, expected exactly one")]
    AmbiguousRoot { count: usize },

    #[error("no visible narrative path")]
    EmptyPathSet,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl CanonError {
    /// The pass produced nothing; the current chapter stays open and the
    /// next scheduled trigger tries again.
    pub fn skips_chapter(&self) -> bool {
        matches!(
            self,
            CanonError::NoRoot | CanonError::AmbiguousRoot { .. } | CanonError::EmptyPathSet
        )
    }
}
