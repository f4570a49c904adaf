// Geometry - reductions over hand-center position lists

use crate::landmarks::{centroid, Landmark};

/// Sum of Euclidean distances between consecutive positions
pub fn path_length(positions: &[Landmark]) -> f64 {
    positions
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

/// Mean vertical coordinate, or 0 for an empty list
pub fn mean_height(positions: &[Landmark]) -> f64 {
    if positions.is_empty() {
        return 0.0;
    }
    positions.iter().map(|p| p.y).sum::<f64>() / positions.len() as f64
}

/// Distance between the mean positions of two lists, or 0 if either is empty
pub fn mean_separation(left: &[Landmark], right: &[Landmark]) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    centroid(left).distance(&centroid(right))
}
