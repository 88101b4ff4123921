//! Dense grids of interpolated values.

use crate::error::{check_dimensions, HeatmapResult};

/// A `width x height` grid of estimates in row-major order (row 0 = top).
///
/// Cells that could not be estimated hold `f32::NAN`. Every other cell is
/// a finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Create a grid where every cell is undefined.
    pub fn new_undefined(width: usize, height: usize) -> HeatmapResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![f32::NAN; width * height],
        })
    }

    /// Wrap row-major cell data.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> HeatmapResult<Self> {
        check_dimensions(width, height)?;
        if data.len() != width * height {
            return Err(crate::HeatmapError::BufferSize {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: zero-sized grids cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the 1D array index for a 2D cell position.
    #[inline]
    pub fn flat_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell value at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.flat_index(x, y)])
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    pub fn into_values(self) -> Vec<f32> {
        self.data
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.width)
    }

    /// Number of cells holding a finite estimate.
    pub fn defined_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_finite()).count()
    }

    /// Minimum and maximum over finite cells, or `None` if none are defined.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
