//! Common types shared across the signal heatmap crates.

pub mod error;
pub mod grid;
pub mod raster;
pub mod sample;

pub use error::{check_dimensions, HeatmapError, HeatmapResult};
pub use grid::Grid;
pub use raster::{BlendParameters, Raster, Rgb};
pub use sample::Sample;
