//! Shared test utilities for the signal heatmap workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Deterministic sample generators
//! - Fixture scans and rasters
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

pub use heatmap_common;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(-59.9999_f32, -60.0_f64, 0.001); // passes
/// assert_approx_eq!(-59.0_f32, -60.0_f32, 0.001);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that two rasters have identical dimensions and bytes.
#[macro_export]
macro_rules! assert_raster_eq {
    ($left:expr, $right:expr) => {{
        let left: &$crate::heatmap_common::Raster = &$left;
        let right: &$crate::heatmap_common::Raster = &$right;
        assert_eq!(left.dimensions(), right.dimensions(), "raster sizes differ");
        if let Some(i) = left
            .as_bytes()
            .iter()
            .zip(right.as_bytes())
            .position(|(a, b)| a != b)
        {
            panic!(
                "rasters differ at byte {} (pixel {}): {} != {}",
                i,
                i / 3,
                left.as_bytes()[i],
                right.as_bytes()[i]
            );
        }
    }};
}
