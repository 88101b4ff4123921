//! Heatmap rendering for scattered signal-strength samples.
//!
//! Pipeline stages:
//! - Palette lookup tables ([`palette`])
//! - Grid normalization and false-color mapping ([`colormap`])
//! - Alpha compositing onto a background ([`compositor`])
//! - End-to-end generation ([`pipeline`])
//! - PNG export of finished rasters ([`png`])

pub mod colormap;
pub mod compositor;
pub mod config;
pub mod palette;
pub mod pipeline;
pub mod png;

pub use colormap::{colorize, ValueRange, UNDEFINED_COLOR};
pub use compositor::{blend, blend_optional, resample_bilinear};
pub use config::HeatmapConfig;
pub use palette::{ColorStop, Palette};
pub use pipeline::{compose_overlay, generate_heatmap, generate_heatmap_with_grid};
