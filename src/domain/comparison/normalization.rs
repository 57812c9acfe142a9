//! Pairwise normalization - Scoring two values relative only to each other.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AreaSide, IndexScore};

/// Which way a raw value improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Better {
    Lower,
    Higher,
}

/// The two areas' 0-100 scores on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScores {
    pub a: IndexScore,
    pub b: IndexScore,
}

impl PairScores {
    pub const EVEN: PairScores = PairScores {
        a: IndexScore::NEUTRAL,
        b: IndexScore::NEUTRAL,
    };

    pub fn side(&self, side: AreaSide) -> IndexScore {
        match side {
            AreaSide::A => self.a,
            AreaSide::B => self.b,
        }
    }

    /// The side with the higher score; `None` when level.
    pub fn leader(&self) -> Option<AreaSide> {
        if self.a > self.b {
            Some(AreaSide::A)
        } else if self.b > self.a {
            Some(AreaSide::B)
        } else {
            None
        }
    }
}

/// Scores two raw values against each other.
///
/// Min-max across the pair only: the better value scores 100 and the other
/// 0, however small the difference. No absolute scale is involved.
///
/// # Edge Cases
/// - Equal values (or either value not finite): 50 / 50
/// - Swapping the inputs swaps the outputs exactly
pub fn normalize_pair(a: f64, b: f64, better: Better) -> PairScores {
    if !a.is_finite() || !b.is_finite() || a == b {
        return PairScores::EVEN;
    }

    let a_is_better = match better {
        Better::Higher => a > b,
        Better::Lower => a < b,
    };
    let (score_a, score_b) = if a_is_better {
        (IndexScore::MAX, IndexScore::ZERO)
    } else {
        (IndexScore::ZERO, IndexScore::MAX)
    };

    PairScores {
        a: score_a,
        b: score_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_score_fifty() {
        assert_eq!(normalize_pair(5.0, 5.0, Better::Higher), PairScores::EVEN);
    }

    #[test]
    fn large_difference_is_min_max() {
        let scores = normalize_pair(400_000.0, 700_000.0, Better::Lower);
        assert_eq!(scores.a.value(), 100.0);
        assert_eq!(scores.b.value(), 0.0);
    }

    #[test]
    fn small_difference_is_still_min_max() {
        let scores = normalize_pair(80.0, 75.0, Better::Higher);
        assert_eq!(scores.a.value(), 100.0);
        assert_eq!(scores.b.value(), 0.0);

        let scores = normalize_pair(500_000.0, 510_000.0, Better::Lower);
        assert_eq!(scores.leader(), Some(AreaSide::A));
        assert_eq!(scores.a.value(), 100.0);
    }

    #[test]
    fn swapping_inputs_swaps_scores_exactly() {
        let forward = normalize_pair(18.3, 41.9, Better::Lower);
        let reverse = normalize_pair(41.9, 18.3, Better::Lower);
        assert_eq!(forward.a, reverse.b);
        assert_eq!(forward.b, reverse.a);
    }

    #[test]
    fn direction_decides_the_leader() {
        let lower = normalize_pair(0.01, 0.02, Better::Lower);
        let higher = normalize_pair(0.01, 0.02, Better::Higher);
        assert_eq!(lower.leader(), Some(AreaSide::A));
        assert_eq!(higher.leader(), Some(AreaSide::B));
    }

    #[test]
    fn non_finite_input_is_even() {
        assert_eq!(normalize_pair(f64::NAN, 1.0, Better::Higher), PairScores::EVEN);
    }
}
