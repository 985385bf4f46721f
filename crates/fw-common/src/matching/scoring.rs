use serde::{Deserialize, Serialize};

use super::weights::{WeightTable, WeightTableError};

pub const MAX_RATING: f64 = 5.0;
/// Completed engagements at which the experience signal saturates.
pub const EXPERIENCE_SATURATION: f64 = 50.0;

/// Sub-scores of a single candidate, each in 0.0〜1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub text_score: f64,
    pub rating_score: f64,
    pub experience_score: f64,
    pub total_score: f64,
}

pub fn rating_score(rating: f64) -> f64 {
    unit_interval(rating / MAX_RATING)
}

pub fn experience_score(completed: u32) -> f64 {
    (completed as f64 / EXPERIENCE_SATURATION).min(1.0)
}

/// Presentation rounding to three decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Clamp into [0, 1]; NaN and infinities degrade to 0.
pub(crate) fn unit_interval(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Weighted sum over a weight table that was validated when the scorer was built.
#[derive(Debug, Clone, Copy)]
pub struct CompositeScorer {
    weights: WeightTable,
}

impl CompositeScorer {
    pub fn new(weights: WeightTable) -> Result<Self, WeightTableError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Returns the unrounded total; `breakdown.total_score` is ignored.
    pub fn compose(&self, breakdown: &ScoreBreakdown) -> f64 {
        let w = &self.weights;
        let total = unit_interval(breakdown.skill_score) * w.skill
            + unit_interval(breakdown.text_score) * w.text
            + unit_interval(breakdown.rating_score) * w.rating
            + unit_interval(breakdown.experience_score) * w.experience;

        unit_interval(total)
    }

    /// Fills `total_score` in place and hands the breakdown back.
    pub fn score(&self, mut breakdown: ScoreBreakdown) -> ScoreBreakdown {
        breakdown.total_score = self.compose(&breakdown);
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::weights::{
        PROJECT_RECOMMENDATION_WEIGHTS, SIMILARITY_WEIGHTS, WORKER_MATCHING_WEIGHTS,
    };
    use proptest::prelude::*;

    #[test]
    fn absent_reputation_scores_zero() {
        assert_eq!(rating_score(0.0), 0.0);
        assert_eq!(experience_score(0), 0.0);
    }

    #[test]
    fn experience_saturates_at_fifty() {
        assert!((experience_score(25) - 0.5).abs() < f64::EPSILON);
        assert_eq!(experience_score(50), 1.0);
        assert_eq!(experience_score(500), 1.0);
    }

    #[test]
    fn rating_is_bounded() {
        assert!((rating_score(4.5) - 0.9).abs() < 1e-12);
        assert_eq!(rating_score(7.0), 1.0);
        assert_eq!(rating_score(f64::NAN), 0.0);
    }

    #[test]
    fn worker_table_weights_each_signal() {
        let scorer = CompositeScorer::new(WORKER_MATCHING_WEIGHTS).unwrap();
        let breakdown = ScoreBreakdown {
            skill_score: 0.5,
            text_score: 0.0,
            rating_score: 0.8,
            experience_score: 1.0,
            total_score: 0.0,
        };

        let total = scorer.compose(&breakdown);

        assert!((total - (0.2 + 0.2 + 0.15)).abs() < 1e-12);
    }

    #[test]
    fn recommendation_table_ignores_everything_but_skills() {
        let scorer = CompositeScorer::new(PROJECT_RECOMMENDATION_WEIGHTS).unwrap();
        let breakdown = ScoreBreakdown {
            skill_score: 0.25,
            text_score: 1.0,
            rating_score: 1.0,
            experience_score: 1.0,
            total_score: 0.0,
        };

        assert!((scorer.compose(&breakdown) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn construction_fails_for_invalid_table() {
        let mut table = SIMILARITY_WEIGHTS;
        table.text = 0.2;

        assert!(CompositeScorer::new(table).is_err());
    }

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(round_score(0.123_456), 0.123);
        assert_eq!(round_score(0.999_6), 1.0);
    }

    proptest! {
        #[test]
        fn totals_stay_in_unit_interval(
            skill in -1.0f64..2.0,
            text in -1.0f64..2.0,
            rating in -1.0f64..2.0,
            experience in -1.0f64..2.0,
        ) {
            let breakdown = ScoreBreakdown {
                skill_score: skill,
                text_score: text,
                rating_score: rating,
                experience_score: experience,
                total_score: 0.0,
            };
            for table in [WORKER_MATCHING_WEIGHTS, SIMILARITY_WEIGHTS, PROJECT_RECOMMENDATION_WEIGHTS] {
                let total = CompositeScorer::new(table).unwrap().compose(&breakdown);
                prop_assert!((0.0..=1.0).contains(&total));
            }
        }
    }
}
