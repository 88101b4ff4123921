//! Scattered signal-strength measurements.

use serde::{Deserialize, Serialize};

/// A single measurement taken at a pixel position.
///
/// `value` is unit-agnostic; for Wi-Fi scans it is typically RSSI in dBm
/// (negative, larger magnitude = weaker signal). Point lists written by the
/// scan tool store it as `signal`, which is accepted as an alias. Extra
/// fields such as the capture `time` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    #[serde(alias = "signal")]
    pub value: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Squared distance from this sample to the pixel at `(gx, gy)`.
    #[inline]
    pub fn distance_sq(&self, gx: f64, gy: f64) -> f64 {
        let dx = gx - self.x;
        let dy = gy - self.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64, f64)> for Sample {
    fn from((x, y, value): (f64, f64, f64)) -> Self {
        Self { x, y, value }
    }
}

/// Minimum and maximum `value` over a sample set, or `None` when empty.
pub fn value_bounds(samples: &[Sample]) -> Option<(f64, f64)> {
    samples.iter().fold(None, |acc, s| match acc {
        None => Some((s.value, s.value)),
        Some((lo, hi)) => Some((lo.min(s.value), hi.max(s.value))),
    })
}
