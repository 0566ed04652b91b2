//! Tunable parameters of the pace adjuster.

use serde::{Deserialize, Serialize};

use crate::metabolic::DEFAULT_FLAT_GRADE_THRESHOLD;

/// Parameters for turning grades into target paces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Spread of the goal-time natural pace as a fraction of the flat pace:
    /// a segment at the race-average cost runs at the flat pace, a zero-cost
    /// segment at `1 - natural_variation` of it (0.3 = 70%).
    pub natural_variation: f64,

    /// Grades (percent) with a smaller magnitude are treated as flat.
    pub flat_grade_threshold: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            natural_variation: 0.3,
            flat_grade_threshold: DEFAULT_FLAT_GRADE_THRESHOLD,
        }
    }
}

impl PacingConfig {
    /// Sets the natural variation band.
    pub fn with_natural_variation(mut self, variation: f64) -> Self {
        self.natural_variation = variation;
        self
    }

    /// Sets the flat-grade threshold.
    pub fn with_flat_grade_threshold(mut self, threshold: f64) -> Self {
        self.flat_grade_threshold = threshold;
        self
    }

    /// The variation band clamped to `[0, 1)`, so natural paces stay positive.
    pub fn variation_band(&self) -> f64 {
        if self.natural_variation.is_finite() {
            self.natural_variation.clamp(0.0, 0.95)
        } else {
            0.0
        }
    }
}
