// Hand shape - fingertip extension heuristic
//
// A finger counts as extended when its tip sits above the palm base by more
// than a fixed margin. With y pointing down, "above" means a smaller y.

use super::types::HandShape;
use crate::landmarks::{Landmark, HAND_LANDMARK_COUNT};

/// Landmark index of the palm base (wrist)
pub const PALM_BASE: usize = 0;

/// Landmark indices of the thumb, index, middle, ring, and pinky tips
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Vertical margin a fingertip must clear to count as extended
pub const EXTENSION_MARGIN: f64 = 0.05;

/// HandShapeClassifier maps one hand's landmarks to a discrete pose
#[derive(Debug, Clone, Copy, Default)]
pub struct HandShapeClassifier;

impl HandShapeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a hand
    ///
    /// Hands with fewer than 21 landmarks (including empty ones) are
    /// `Unknown`.
    pub fn classify(&self, hand: &[Landmark]) -> HandShape {
        match self.extended_fingers(hand) {
            None => HandShape::Unknown,
            Some(0) => HandShape::Fist,
            Some(1) => HandShape::Point,
            Some(2) => HandShape::Peace,
            Some(5) => HandShape::Open,
            Some(_) => HandShape::Partial,
        }
    }

    /// Count extended fingers, or `None` if the hand is not fully tracked
    pub fn extended_fingers(&self, hand: &[Landmark]) -> Option<usize> {
        if hand.len() < HAND_LANDMARK_COUNT {
            return None;
        }

        let limit = hand[PALM_BASE].y - EXTENSION_MARGIN;
        Some(
            FINGERTIPS
                .iter()
                .filter(|&&tip| hand[tip].y < limit)
                .count(),
        )
    }
}
