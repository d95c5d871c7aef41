//! Submission checks - the pure half of gating a new shard.
//!
//! The store looks up the parent and the author's recent submission count;
//! this module decides whether the shard may be created and which violations
//! get recorded on it. Votes are gated the same way.

use thiserror::Error;

use crate::config::RulesConfig;
use crate::entities::{Shard, ShardId, StoryId};
use crate::rule_card::RuleCard;
use crate::validation::{is_profane, validate_shard_text, PROFANITY_VIOLATION};

/// Reasons a submission is turned away. These are expected outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    #[error("parent shard {0} not found")]
    ParentNotFound(ShardId),

    #[error("cannot continue from shard {0}")]
    ParentClosed(ShardId),

    #[error("rate limit of {limit} submissions exceeded")]
    RateLimited { limit: u32 },

    #[error("validation failed: {}", .violations.join("; "))]
    Validation { violations: Vec<String> },
}

/// Reasons a vote is turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteRejection {
    #[error("shard {0} not found")]
    NotFound(ShardId),

    #[error("cannot vote on hidden shard {0}")]
    Hidden(ShardId),
}

/// Everything needed to judge one submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionRequest<'a> {
    pub text: &'a str,
    pub rule_card: &'a RuleCard,

    /// Parent the author wants to continue from, if any.
    pub parent_id: Option<ShardId>,

    /// The parent as loaded from the store (`None` if the lookup missed).
    pub parent: Option<&'a Shard>,

    /// Submissions the author already made in the current window.
    pub recent_submissions: u32,
}

/// Decide whether a shard may be created.
///
/// On success returns the violations to record on the new shard; these are
/// informational (e.g. profanity) since any rule violation rejects outright.
pub fn check_submission(
    request: &SubmissionRequest<'_>,
    config: &RulesConfig,
) -> Result<Vec<String>, SubmissionRejection> {
    if let Some(parent_id) = request.parent_id {
        let parent = request
            .parent
            .filter(|p| p.id == parent_id)
            .ok_or(SubmissionRejection::ParentNotFound(parent_id))?;
        if !parent.accepts_children() {
            return Err(SubmissionRejection::ParentClosed(parent_id));
        }
    }

    if request.recent_submissions >= config.rate_limit_per_hour {
        return Err(SubmissionRejection::RateLimited {
            limit: config.rate_limit_per_hour,
        });
    }

    let result = validate_shard_text(request.text, request.rule_card, &config.limits);
    if !result.valid {
        return Err(SubmissionRejection::Validation {
            violations: result.violations,
        });
    }

    let mut violations = result.violations;
    if is_profane(request.text) {
        violations.push(PROFANITY_VIOLATION.to_string());
    }
    Ok(violations)
}

/// Whether a freshly accepted shard starts hidden pending moderator review.
///
/// An author's first shard in a window is held back when review is enabled.
pub fn new_shard_hidden_for_review(recent_submissions: u32, config: &RulesConfig) -> bool {
    config.mod_review_enabled && recent_submissions == 0
}

/// Decide whether `shard` may be voted on within the chapter `story_id`.
///
/// A shard from another chapter counts as not found.
pub fn check_vote(shard: &Shard, story_id: StoryId) -> Result<(), VoteRejection> {
    if shard.story_id != story_id {
        return Err(VoteRejection::NotFound(shard.id));
    }
    if shard.hidden {
        return Err(VoteRejection::Hidden(shard.id));
    }
    Ok(())
}

/// Check a vote and apply it, returning the new score.
pub fn cast_vote(shard: &mut Shard, story_id: StoryId, delta: i64) -> Result<i64, VoteRejection> {
    check_vote(shard, story_id)?;
    Ok(shard.apply_vote(delta))
}
