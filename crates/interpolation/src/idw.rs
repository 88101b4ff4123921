//! Inverse distance weighting.
//!
//! Cell `(gx, gy)` sits at integer pixel coordinates (no half-pixel offset).
//! Its estimate is `sum(w_i * v_i) / sum(w_i)` with
//! `w_i = 1 / (d_i^power + epsilon)`, accumulated in `f64` and narrowed to
//! `f32` at the end.
//!
//! A cell that coincides exactly with a sample takes that sample's value.
//! The coinciding sample still contributes to the weighted sum with its
//! squared distance clamped to `epsilon`, but the direct assignment decides
//! the cell. When several samples share a cell, the last one in input order
//! wins.

use std::time::Instant;

use heatmap_common::{check_dimensions, Grid, HeatmapResult, Sample};
use rayon::prelude::*;
use tracing::debug;

use crate::params::IdwParams;

/// Interpolate with the given `power` and `epsilon`.
///
/// Returns an all-undefined grid when `samples` is empty.
pub fn interpolate(
    samples: &[Sample],
    width: usize,
    height: usize,
    power: f64,
    epsilon: f64,
) -> HeatmapResult<Grid> {
    interpolate_with(samples, width, height, &IdwParams::new(power, epsilon))
}

/// Interpolate using a full parameter set.
pub fn interpolate_with(
    samples: &[Sample],
    width: usize,
    height: usize,
    params: &IdwParams,
) -> HeatmapResult<Grid> {
    check_dimensions(width, height)?;
    params.validate()?;

    if samples.is_empty() {
        debug!(width, height, "No samples, returning undefined grid");
        return Grid::new_undefined(width, height);
    }

    let start = Instant::now();
    let mut data = vec![f32::NAN; width * height];

    let fill_row = |(gy, row): (usize, &mut [f32])| {
        for (gx, cell) in row.iter_mut().enumerate() {
            *cell = estimate_at(samples, gx as f64, gy as f64, params);
        }
    };

    if params.parallel {
        data.par_chunks_mut(width).enumerate().for_each(fill_row);
    } else {
        data.chunks_mut(width).enumerate().for_each(fill_row);
    }

    debug!(
        samples = samples.len(),
        width,
        height,
        parallel = params.parallel,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "IDW interpolation complete"
    );

    Grid::from_vec(width, height, data)
}

/// Estimate a single cell at pixel position `(gx, gy)`.
///
/// Returns `f32::NAN` when `samples` is empty or the weight sum is not a
/// positive finite number.
pub fn estimate_at(samples: &[Sample], gx: f64, gy: f64, params: &IdwParams) -> f32 {
    let mut numerator = 0.0f64;
    let mut denominator = 0.0f64;
    let mut exact: Option<f64> = None;

    for sample in samples {
        let mut dist_sq = sample.distance_sq(gx, gy);
        if dist_sq == 0.0 {
            exact = Some(sample.value);
            dist_sq = params.epsilon;
        }

        let weight = 1.0 / (params.distance_pow(dist_sq) + params.epsilon);
        numerator += weight * sample.value;
        denominator += weight;
    }

    if let Some(value) = exact {
        return value as f32;
    }

    if denominator == 0.0 || !denominator.is_finite() {
        return f32::NAN;
    }

    (numerator / denominator) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential() -> IdwParams {
        IdwParams::default().sequential()
    }

    #[test]
    fn test_two_samples_on_a_line() {
        let samples = [Sample::new(0.0, 0.0, -40.0), Sample::new(10.0, 0.0, -80.0)];
        let grid = interpolate(&samples, 11, 1, 2.0, 1e-6).unwrap();

        assert_eq!(grid.get(0, 0), Some(-40.0));
        assert_eq!(grid.get(10, 0), Some(-80.0));
        // Equidistant cell: equal weights give the plain average
        assert!((grid.get(5, 0).unwrap() - (-60.0)).abs() < 1e-4);
    }

    #[test]
    fn test_values_move_monotonically_between_samples() {
        let samples = [Sample::new(0.0, 0.0, -40.0), Sample::new(10.0, 0.0, -80.0)];
        let grid = interpolate_with(&samples, 11, 1, &sequential()).unwrap();
        let row = grid.values();
        for pair in row.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_empty_samples_all_undefined() {
        let grid = interpolate(&[], 5, 4, 2.0, 1e-6).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.defined_count(), 0);
    }

    #[test]
    fn test_single_sample_fills_grid() {
        let samples = [Sample::new(2.5, 1.5, -55.0)];
        let grid = interpolate_with(&samples, 6, 4, &sequential()).unwrap();
        assert!(grid.values().iter().all(|&v| (v - (-55.0)).abs() < 1e-4));
    }

    #[test]
    fn test_duplicate_position_last_wins() {
        let samples = [
            Sample::new(3.0, 2.0, -40.0),
            Sample::new(0.0, 0.0, -90.0),
            Sample::new(3.0, 2.0, -70.0),
        ];
        let grid = interpolate_with(&samples, 5, 5, &sequential()).unwrap();
        assert_eq!(grid.get(3, 2), Some(-70.0));
        assert_eq!(grid.get(0, 0), Some(-90.0));
    }

    #[test]
    fn test_fractional_sample_never_exact() {
        // Not on an integer cell, so every cell is a blend
        let samples = [Sample::new(0.5, 0.0, -40.0), Sample::new(3.0, 0.0, -80.0)];
        let grid = interpolate_with(&samples, 4, 1, &sequential()).unwrap();
        let v = grid.get(0, 0).unwrap();
        assert!(v < -40.0 && v > -80.0);
    }

    #[test]
    fn test_samples_outside_grid_extrapolate() {
        let samples = [
            Sample::new(-50.0, -50.0, -30.0),
            Sample::new(200.0, 200.0, -90.0),
        ];
        let grid = interpolate_with(&samples, 8, 8, &sequential()).unwrap();
        assert_eq!(grid.defined_count(), 64);
        assert!(grid
            .values()
            .iter()
            .all(|&v| (-90.0..=-30.0).contains(&v)));
    }

    #[test]
    fn test_power_changes_falloff() {
        let samples = [Sample::new(0.0, 0.0, 0.0), Sample::new(10.0, 0.0, 100.0)];
        let low = interpolate(&samples, 11, 1, 1.0, 1e-6).unwrap();
        let high = interpolate(&samples, 11, 1, 4.0, 1e-6).unwrap();
        // Closer to the 0-valued sample, a higher power pulls harder toward it
        assert!(high.get(2, 0).unwrap() < low.get(2, 0).unwrap());
    }

    #[test]
    fn test_invalid_arguments() {
        let samples = [Sample::new(0.0, 0.0, 1.0)];
        assert!(interpolate(&samples, 0, 5, 2.0, 1e-6).is_err());
        assert!(interpolate(&samples, 5, 0, 2.0, 1e-6).is_err());
        assert!(interpolate(&samples, 5, 5, 0.0, 1e-6).is_err());
        assert!(interpolate(&samples, 5, 5, -2.0, 1e-6).is_err());
    }

    #[test]
    fn test_estimate_at_no_samples() {
        assert!(estimate_at(&[], 0.0, 0.0, &IdwParams::default()).is_nan());
    }

    #[test]
    fn test_zero_weight_sum_is_undefined() {
        // Distances so large that d^power overflows to infinity; weights become zero
        let samples = [Sample::new(1e300, 1e300, -50.0)];
        let params = IdwParams::new(8.0, 0.0);
        assert!(estimate_at(&samples, 0.0, 0.0, &params).is_nan());
    }
}
