// FeatureExtractor - window feature extraction for gloss recognition
//
// This module reduces a window of landmark frames to a fixed-schema
// FeatureVector used for signature matching.
//
// Module organization:
// - types: Data structures (FeatureVector, HandShape)
// - hand_shape: Fingertip-extension pose classifier
// - geometry: Reductions over hand-center position lists
// - mod.rs: Coordinator (FeatureExtractor)
//
// Features extracted:
// 1. Hand movement: path length of left centers followed by right centers
// 2. Hand height: mean y of all hand centers
// 3. Hand distance: separation of mean left and mean right centers
// 4. Hand shape: first pose classified in the window (left before right)
// 5. Two hands: both hands seen somewhere in the window
// 6. Face present: any frame carried face landmarks
//
// The left-then-right concatenation for movement counts the jump between the
// last left sample and the first right sample. Reference signatures were
// derived with this exact formula, so it must not be "corrected".

mod geometry;
mod hand_shape;
mod types;

pub use hand_shape::{HandShapeClassifier, EXTENSION_MARGIN, FINGERTIPS, PALM_BASE};
pub use types::{FeatureVector, HandShape};

use crate::landmarks::{centroid, Frame, Landmark};
use geometry::{mean_height, mean_separation, path_length};

/// FeatureExtractor coordinates per-window feature extraction
///
/// Stateless; one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    shape_classifier: HandShapeClassifier,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            shape_classifier: HandShapeClassifier::new(),
        }
    }

    /// Extract features from a window of frames
    ///
    /// # Arguments
    /// * `window` - Consecutive frames treated as one candidate gesture
    ///
    /// # Returns
    /// FeatureVector; an empty window or one without hands yields the
    /// zero/false/undetermined defaults (plus `face_present` if applicable).
    pub fn extract(&self, window: &[Frame]) -> FeatureVector {
        let mut left_positions: Vec<Landmark> = Vec::with_capacity(window.len());
        let mut right_positions: Vec<Landmark> = Vec::with_capacity(window.len());
        let mut hand_shape = HandShape::Undetermined;
        let mut face_present = false;

        for frame in window {
            if let Some(hand) = frame.left_hand() {
                left_positions.push(centroid(hand));
                if hand_shape == HandShape::Undetermined {
                    hand_shape = self.shape_classifier.classify(hand);
                }
            }

            if let Some(hand) = frame.right_hand() {
                right_positions.push(centroid(hand));
                if hand_shape == HandShape::Undetermined {
                    hand_shape = self.shape_classifier.classify(hand);
                }
            }

            face_present |= frame.has_face();
        }

        let two_hands = !left_positions.is_empty() && !right_positions.is_empty();
        let hand_distance = mean_separation(&left_positions, &right_positions);

        let mut combined = left_positions;
        combined.extend_from_slice(&right_positions);

        FeatureVector {
            hand_movement: path_length(&combined),
            hand_height: mean_height(&combined),
            hand_distance,
            hand_shape,
            two_hands,
            face_present,
        }
    }
}
