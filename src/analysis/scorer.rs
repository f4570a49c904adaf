// Scorer - weighted similarity between a window and a reference signature
//
// Five independent terms contribute, each only when the reference signature
// carries the matching key. The final score is normalized by the weights of
// the terms that applied, so partial signatures still score in [0, 1].
//
// | term      | weight | contribution                                  |
// |-----------|--------|-----------------------------------------------|
// | movement  | 0.3    | proximity(movement, scale 0.5) * 0.3          |
// | shape     | 0.3    | 0.3 on exact label match                      |
// | height    | 0.2    | proximity(height, scale 0.3) * 0.2            |
// | two_hands | 0.1    | 0.1 on equality                               |
// | distance  | 0.1    | proximity(distance, scale 0.5) * 0.1,         |
// |           |        | only when the window itself is two-handed     |
//
// Applicability follows the reference, never the extracted vector, so
// score(f, r) is not symmetric. The scale constants are the expected dynamic
// range of hand motion in normalized coordinates; existing reference stores
// were tuned against them and they must stay fixed.

use serde::Serialize;

use crate::analysis::features::FeatureVector;
use crate::signatures::SignatureFeatures;

pub const MOVEMENT_WEIGHT: f64 = 0.3;
pub const SHAPE_WEIGHT: f64 = 0.3;
pub const HEIGHT_WEIGHT: f64 = 0.2;
pub const TWO_HANDS_WEIGHT: f64 = 0.1;
pub const DISTANCE_WEIGHT: f64 = 0.1;

pub const MOVEMENT_SCALE: f64 = 0.5;
pub const HEIGHT_SCALE: f64 = 0.3;
pub const DISTANCE_SCALE: f64 = 0.5;

/// Per-term weighted contributions; `None` marks a term that did not apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub movement: Option<f64>,
    pub shape: Option<f64>,
    pub height: Option<f64>,
    pub two_hands: Option<f64>,
    pub distance: Option<f64>,
}

impl ScoreBreakdown {
    fn terms(&self) -> [(Option<f64>, f64); 5] {
        [
            (self.movement, MOVEMENT_WEIGHT),
            (self.shape, SHAPE_WEIGHT),
            (self.height, HEIGHT_WEIGHT),
            (self.two_hands, TWO_HANDS_WEIGHT),
            (self.distance, DISTANCE_WEIGHT),
        ]
    }

    /// Sum of the weights of the applied terms
    pub fn applied_weight(&self) -> f64 {
        self.terms()
            .iter()
            .filter(|(contribution, _)| contribution.is_some())
            .map(|(_, weight)| weight)
            .sum()
    }

    /// Normalized score in [0, 1]; 0 when no term applied
    pub fn score(&self) -> f64 {
        let (total, weight) = self
            .terms()
            .iter()
            .filter_map(|(contribution, weight)| contribution.map(|c| (c, *weight)))
            .fold((0.0_f64, 0.0_f64), |(total, applied), (c, w)| {
                (total + c, applied + w)
            });

        if weight > 0.0 {
            total / weight
        } else {
            0.0
        }
    }
}

/// SimilarityScorer compares extracted features with reference signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Weighted match score in [0, 1]
    ///
    /// # Arguments
    /// * `features` - Features extracted from the current window
    /// * `reference` - Partial feature set of a stored signature
    pub fn score(&self, features: &FeatureVector, reference: &SignatureFeatures) -> f64 {
        self.breakdown(features, reference).score()
    }

    /// Compute every applicable term without normalizing
    pub fn breakdown(&self, features: &FeatureVector, reference: &SignatureFeatures) -> ScoreBreakdown {
        ScoreBreakdown {
            movement: reference.hand_movement.map(|expected| {
                proximity(features.hand_movement, expected, MOVEMENT_SCALE) * MOVEMENT_WEIGHT
            }),
            shape: reference
                .hand_shape
                .map(|expected| if features.hand_shape == expected { SHAPE_WEIGHT } else { 0.0 }),
            height: reference.hand_height.map(|expected| {
                proximity(features.hand_height, expected, HEIGHT_SCALE) * HEIGHT_WEIGHT
            }),
            two_hands: reference.two_hands.map(|expected| {
                if features.two_hands == expected {
                    TWO_HANDS_WEIGHT
                } else {
                    0.0
                }
            }),
            distance: reference
                .hand_distance
                .filter(|_| features.two_hands)
                .map(|expected| {
                    proximity(features.hand_distance, expected, DISTANCE_SCALE) * DISTANCE_WEIGHT
                }),
        }
    }
}

/// Linear falloff from 1 at equality to 0 at `scale` apart
fn proximity(actual: f64, expected: f64, scale: f64) -> f64 {
    (1.0 - (actual - expected).abs() / scale).max(0.0)
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;
