//! 8-bit RGB rasters and blend parameters.
//!
//! Pixels are stored as interleaved bytes in **red, green, blue** order,
//! row-major with row 0 at the top. The same order is used by every crate in
//! the workspace, including PNG export, so no channel swizzling happens
//! anywhere.

use crate::error::{check_dimensions, HeatmapError, HeatmapResult};
use serde::{Deserialize, Serialize};

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// An RGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A dense `width x height` RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Create a raster filled with one color.
    pub fn new(width: usize, height: usize, fill: Rgb) -> HeatmapResult<Self> {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&fill.to_array());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap interleaved RGB bytes.
    pub fn from_rgb_bytes(width: usize, height: usize, data: Vec<u8>) -> HeatmapResult<Self> {
        check_dimensions(width, height)?;
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(HeatmapError::BufferSize {
                expected,
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

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn same_size(&self, other: &Raster) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * CHANNELS;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&color.to_array());
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Weight of the foreground raster when compositing.
///
/// Values outside `[0, 1]` are accepted and extrapolate the blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendParameters {
    pub alpha: f32,
}

impl Default for BlendParameters {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}
