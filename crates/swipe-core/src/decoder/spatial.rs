use crate::layout::{KeyLayout, Point};

/// Gaussian log-likelihood of a touch sample given a key centroid.
///
/// `score = -d² / (2σ²)`. Anything non-finite (NaN or infinite
/// coordinates) collapses to `NEG_INFINITY` so the branch is dropped.
#[derive(Debug, Clone, Copy)]
pub struct SpatialModel {
    inv_two_sigma_sq: f64,
}

impl SpatialModel {
    pub fn new(sigma: f64) -> Self {
        Self {
            inv_two_sigma_sq: 1.0 / (2.0 * sigma * sigma),
        }
    }

    pub fn score(&self, sample: Point, centroid: Point) -> f64 {
        let score = -sample.distance_squared(centroid) * self.inv_two_sigma_sq;
        if score.is_finite() {
            score
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Score `sample` against `key`, or `None` when the layout has no such key.
    pub fn key_score(&self, layout: &KeyLayout, key: char, sample: Point) -> Option<f64> {
        layout.centroid(key).map(|c| self.score(sample, c))
    }
}
