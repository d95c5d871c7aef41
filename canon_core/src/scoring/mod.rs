//! Path scoring - ranks enumerated narratives.
//!
//! Each path is scored on four signals:
//! 1. **Approval**: summed votes, normalized by the best path's sum
//! 2. **Novelty**: lexical novelty of the path's texts
//! 3. **Diversity**: distinct authors over shard count
//! 4. **Penalty**: violations recorded at submission, times a fixed cost
//!
//! `final = votes_weight * approval + novelty_weight * novelty
//!        + diversity_weight * diversity - penalty`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CanonError;
use crate::lexical::{diversity_score, novelty_score};
use crate::tree::NarrativePath;

/// Weights for combining the path signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of normalized approval.
    pub votes_weight: f64,

    /// Weight of lexical novelty.
    pub novelty_weight: f64,

    /// Weight of author diversity.
    pub diversity_weight: f64,

    /// Deducted once per recorded violation.
    pub penalty_per_violation: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            votes_weight: 0.5,
            novelty_weight: 0.3,
            diversity_weight: 0.2,
            penalty_per_violation: 0.15,
        }
    }
}

/// Score every path and sort them best first.
///
/// The sort is stable, so equal scores keep enumeration order and the
/// earliest discovered path wins a tie.
pub fn score_paths(
    mut paths: Vec<NarrativePath>,
    weights: &ScoringWeights,
) -> Vec<NarrativePath> {
    let max_votes = paths.iter().map(NarrativePath::vote_sum).max().unwrap_or(0);

    for path in &mut paths {
        path.total_votes = path.vote_sum();
        let votes_norm = if max_votes > 0 {
            path.total_votes as f64 / max_votes as f64
        } else {
            0.0
        };

        path.novelty_score = novelty_score(&path.texts());
        path.diversity_score = diversity_score(&path.author_names());
        path.penalty_score = path.violation_count() as f64 * weights.penalty_per_violation;

        path.final_score = weights.votes_weight * votes_norm
            + weights.novelty_weight * path.novelty_score
            + weights.diversity_weight * path.diversity_score
            - path.penalty_score;
    }

    paths.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    if let Some(best) = paths.first() {
        debug!(
            paths = paths.len(),
            best_score = best.final_score,
            best_len = best.len(),
            "ranked narrative paths"
        );
    }
    paths
}

/// The top-ranked path of an already ranked list.
pub fn select_best(ranked: &[NarrativePath]) -> Result<&NarrativePath, CanonError> {
    ranked.first().ok_or(CanonError::EmptyPathSet)
}
