//! Normalization and false-color mapping of interpolated grids.

use heatmap_common::{Grid, HeatmapResult, Raster, Rgb};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::palette::Palette;

/// Color used for undefined cells and for grids with no defined cells.
pub const UNDEFINED_COLOR: Rgb = Rgb::BLACK;

/// The value interval mapped onto the palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Data-driven range clamped into `[floor, ceiling]`.
    ///
    /// Starts from the grid's finite min/max, raises the minimum to at least
    /// `floor` and lowers the maximum to at most `ceiling`. When that leaves
    /// an empty interval, or the grid has no defined cells, the range falls
    /// back to `[floor, ceiling]`.
    pub fn resolve(grid: &Grid, floor: f32, ceiling: f32) -> Self {
        let fallback = Self::new(floor, ceiling);

        let Some((data_min, data_max)) = grid.finite_range() else {
            return fallback;
        };

        let min = data_min.max(floor);
        let max = data_max.min(ceiling);
        if min >= max {
            warn!(
                data_min,
                data_max, floor, ceiling, "Data range collapsed, using configured floor/ceiling"
            );
            return fallback;
        }

        Self::new(min, max)
    }

    /// Normalize `value` into `[0, 1]`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Map a grid to colors through `palette`.
///
/// Missing bounds are derived from the grid's finite cells; a collapsed
/// range `vmin == vmax` is widened to `vmax = vmin + 1`. Undefined cells are
/// painted [`UNDEFINED_COLOR`], and a grid with no defined cells produces a
/// raster of that color only.
pub fn colorize(
    grid: &Grid,
    vmin: Option<f32>,
    vmax: Option<f32>,
    palette: &Palette,
) -> HeatmapResult<Raster> {
    let (width, height) = (grid.width(), grid.height());

    let Some((data_min, data_max)) = grid.finite_range() else {
        debug!(width, height, "Grid has no defined cells, painting sentinel color");
        return Raster::new(width, height, UNDEFINED_COLOR);
    };

    let min = vmin.unwrap_or(data_min);
    let mut max = vmax.unwrap_or(data_max);
    if min == max {
        max = min + 1.0;
    }
    let range = ValueRange::new(min, max);

    debug!(
        width,
        height,
        vmin = range.min,
        vmax = range.max,
        "Colorizing grid"
    );

    let mut pixels = Vec::with_capacity(width * height * 3);
    for &value in grid.values() {
        let color = if value.is_finite() {
            palette.lookup(range.normalize(value))
        } else {
            UNDEFINED_COLOR
        };
        pixels.extend_from_slice(&color.to_array());
    }

    Raster::from_rgb_bytes(width, height, pixels)
}
