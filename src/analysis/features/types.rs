// Types module - Data structures for window features
//
// This module defines the core data structures used throughout the feature
// extraction pipeline and shared with the signature store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete hand pose derived from fingertip extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandShape {
    /// No extended fingers
    Fist,
    /// All five fingers extended
    Open,
    /// One extended finger
    Point,
    /// Two extended fingers
    Peace,
    /// Three or four extended fingers
    Partial,
    /// Hand present but with too few landmarks to classify
    Unknown,
    /// No hand was processed in the window (empty label on the wire)
    #[default]
    #[serde(rename = "")]
    Undetermined,
}

impl HandShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandShape::Fist => "fist",
            HandShape::Open => "open",
            HandShape::Point => "point",
            HandShape::Peace => "peace",
            HandShape::Partial => "partial",
            HandShape::Unknown => "unknown",
            HandShape::Undetermined => "",
        }
    }
}

impl fmt::Display for HandShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features extracted from a window of frames
///
/// Every field is always populated; missing capture data degrades to the
/// zero/false/undetermined defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Total path length of the combined (left then right) hand-center sequence
    pub hand_movement: f64,

    /// Mean vertical coordinate of all hand-center samples
    ///
    /// Smaller values are higher in the frame.
    pub hand_height: f64,

    /// Distance between the mean left and mean right hand centers
    pub hand_distance: f64,

    /// First hand shape classified in the window
    pub hand_shape: HandShape,

    /// Both hands appeared somewhere in the window (not necessarily together)
    pub two_hands: bool,

    /// Any frame carried face landmarks
    pub face_present: bool,
}
