//! Tuning parameters for IDW interpolation.

use heatmap_common::{HeatmapError, HeatmapResult};
use serde::{Deserialize, Serialize};

/// Default distance exponent.
pub const DEFAULT_POWER: f64 = 2.0;

/// Default weight regularizer.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Parameters for [`crate::interpolate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdwParams {
    /// Exponent applied to distance: `w = 1 / (d^power + epsilon)`.
    pub power: f64,

    /// Added to every `d^power` so weights stay finite. Also the squared
    /// distance used for a sample sitting exactly on a cell.
    pub epsilon: f64,

    /// Evaluate rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
            epsilon: DEFAULT_EPSILON,
            parallel: true,
        }
    }
}

impl IdwParams {
    pub fn new(power: f64, epsilon: f64) -> Self {
        Self {
            power,
            epsilon,
            ..Self::default()
        }
    }

    /// Evaluate on the calling thread only.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validate the parameters.
    pub fn validate(&self) -> HeatmapResult<()> {
        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(HeatmapError::invalid_argument(format!(
                "power must be a positive finite number, got {}",
                self.power
            )));
        }

        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(HeatmapError::invalid_argument(format!(
                "epsilon must be a non-negative finite number, got {}",
                self.epsilon
            )));
        }

        Ok(())
    }

    /// `d^power` computed from a squared distance without a square root.
    #[inline]
    pub(crate) fn distance_pow(&self, dist_sq: f64) -> f64 {
        if self.power == 2.0 {
            dist_sq
        } else {
            dist_sq.powf(self.power / 2.0)
        }
    }
}
