// Landmarks - passive capture data for one instant
//
// Frames arrive already tracked (pose, hands, face) from the capture client.
// Coordinates are normalized image space: x to the right, y pointing down,
// z depth. Nothing here validates ranges or cardinalities; the analysis
// pipeline degrades gracefully on partial data.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a fully tracked hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single 3D landmark
///
/// Deserializes from either `[x, y, z, ..]` (the capture client's format;
/// trailing components such as visibility are ignored) or
/// `{ "x": .., "y": .., "z": .. }`. Always serializes as `[x, y, z]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LandmarkRepr", into = "[f64; 3]")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkRepr {
    Array(Vec<f64>),
    Object { x: f64, y: f64, z: f64 },
}

impl TryFrom<LandmarkRepr> for Landmark {
    type Error = String;

    fn try_from(repr: LandmarkRepr) -> Result<Self, Self::Error> {
        match repr {
            LandmarkRepr::Array(components) => match components.as_slice() {
                [x, y, z, ..] => Ok(Landmark::new(*x, *y, *z)),
                short => Err(format!(
                    "landmark array needs at least 3 components, got {}",
                    short.len()
                )),
            },
            LandmarkRepr::Object { x, y, z } => Ok(Landmark { x, y, z }),
        }
    }
}

impl From<Landmark> for [f64; 3] {
    fn from(landmark: Landmark) -> Self {
        [landmark.x, landmark.y, landmark.z]
    }
}

/// One capture instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Capture timestamp (epoch or `performance.now()` millis), passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Capture sequence number, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<u64>,
    #[serde(default)]
    pub pose_landmarks: Vec<Landmark>,
    #[serde(default)]
    pub left_hand: Option<Vec<Landmark>>,
    #[serde(default)]
    pub right_hand: Option<Vec<Landmark>>,
    #[serde(default)]
    pub face_landmarks: Option<Vec<Landmark>>,
}

impl Frame {
    /// Left hand landmarks, treating an empty list as not visible
    pub fn left_hand(&self) -> Option<&[Landmark]> {
        non_empty(&self.left_hand)
    }

    /// Right hand landmarks, treating an empty list as not visible
    pub fn right_hand(&self) -> Option<&[Landmark]> {
        non_empty(&self.right_hand)
    }

    pub fn has_face(&self) -> bool {
        non_empty(&self.face_landmarks).is_some()
    }
}

fn non_empty(points: &Option<Vec<Landmark>>) -> Option<&[Landmark]> {
    points.as_deref().filter(|points| !points.is_empty())
}

/// Component-wise mean of a set of landmarks (the hand center)
///
/// Returns the origin for an empty set.
pub fn centroid(points: &[Landmark]) -> Landmark {
    if points.is_empty() {
        return Landmark::default();
    }

    let count = points.len() as f64;
    let (sx, sy, sz) = points.iter().fold((0.0, 0.0, 0.0), |(sx, sy, sz), p| {
        (sx + p.x, sy + p.y, sz + p.z)
    });
    Landmark::new(sx / count, sy / count, sz / count)
}
