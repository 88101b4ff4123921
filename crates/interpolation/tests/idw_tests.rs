//! Tests for IDW interpolation.
//!
//! Covers the exact-match policy, boundedness over random scans and
//! agreement between the sequential and row-parallel paths.

use heatmap_common::Sample;
use interpolation::{interpolate, interpolate_with, IdwParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_utils::{assert_approx_eq, office_scan, random_samples, two_point_line};

fn random_scan(rng: &mut StdRng, width: usize, height: usize) -> Vec<Sample> {
    let count = rng.gen_range(1..12);
    (0..count)
        .map(|_| {
            // Mix integer and fractional positions, some outside the grid
            let x = if rng.gen_bool(0.3) {
                rng.gen_range(0..width) as f64
            } else {
                rng.gen_range(-5.0..width as f64 + 5.0)
            };
            let y = if rng.gen_bool(0.3) {
                rng.gen_range(0..height) as f64
            } else {
                rng.gen_range(-5.0..height as f64 + 5.0)
            };
            let value = rng.gen_range(-95..=-30) as f64;
            Sample::new(x, y, value)
        })
        .collect()
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_two_point_line_scenario() {
    let grid = interpolate(&two_point_line(), 11, 1, 2.0, 1e-6).unwrap();

    assert_eq!(grid.width(), 11);
    assert_eq!(grid.height(), 1);
    assert_eq!(grid.get(0, 0), Some(-40.0));
    assert_eq!(grid.get(10, 0), Some(-80.0));
    assert_approx_eq!(grid.get(5, 0).unwrap(), -60.0, 1e-4);
}

#[test]
fn test_office_scan_hits_samples_exactly() {
    let samples = office_scan();
    let grid = interpolate_with(&samples, 400, 400, &IdwParams::default()).unwrap();

    for s in &samples {
        assert_eq!(
            grid.get(s.x as usize, s.y as usize),
            Some(s.value as f32),
            "cell at ({}, {})",
            s.x,
            s.y
        );
    }

    let (lo, hi) = grid.finite_range().unwrap();
    assert_eq!(lo, -70.0);
    assert_eq!(hi, -40.0);
}

#[test]
fn test_grid_dimensions_match_request() {
    let grid = interpolate(&office_scan(), 37, 23, 2.0, 1e-6).unwrap();
    assert_eq!(grid.width(), 37);
    assert_eq!(grid.height(), 23);
    assert_eq!(grid.len(), 37 * 23);
}

// ============================================================================
// Exact-match policy
// ============================================================================

#[test]
fn test_exact_match_holds_for_random_scans() {
    for seed in 0..20 {
        let samples = random_samples(16, 32, 24, seed);
        let grid = interpolate_with(&samples, 32, 24, &IdwParams::default()).unwrap();

        for (i, s) in samples.iter().enumerate() {
            if s.x.fract() != 0.0 || s.y.fract() != 0.0 {
                continue;
            }
            // Last sample at this position decides the cell
            let expected = samples
                .iter()
                .rev()
                .find(|o| o.x == s.x && o.y == s.y)
                .map(|o| o.value)
                .unwrap();
            assert_eq!(
                grid.get(s.x as usize, s.y as usize),
                Some(expected as f32),
                "seed {seed}, sample {i}"
            );
        }
    }
}

#[test]
fn test_duplicate_position_last_wins_over_order() {
    let forward = [Sample::new(2.0, 2.0, -40.0), Sample::new(2.0, 2.0, -90.0)];
    let reverse = [Sample::new(2.0, 2.0, -90.0), Sample::new(2.0, 2.0, -40.0)];

    let a = interpolate(&forward, 5, 5, 2.0, 1e-6).unwrap();
    let b = interpolate(&reverse, 5, 5, 2.0, 1e-6).unwrap();

    assert_eq!(a.get(2, 2), Some(-90.0));
    assert_eq!(b.get(2, 2), Some(-40.0));
}

// ============================================================================
// Invariants over random scans
// ============================================================================

#[test]
fn test_defined_cells_within_sample_bounds() {
    let mut rng = StdRng::seed_from_u64(0x1d3);

    for _ in 0..200 {
        let width = rng.gen_range(1..24);
        let height = rng.gen_range(1..24);
        let samples = random_scan(&mut rng, width, height);
        let power = rng.gen_range(0.5..4.0);

        let lo = samples.iter().map(|s| s.value).fold(f64::INFINITY, f64::min);
        let hi = samples
            .iter()
            .map(|s| s.value)
            .fold(f64::NEG_INFINITY, f64::max);

        let grid = interpolate(&samples, width, height, power, 1e-6).unwrap();
        assert_eq!(grid.defined_count(), width * height);

        for &v in grid.values() {
            assert!(
                (v as f64) >= lo - 1e-3 && (v as f64) <= hi + 1e-3,
                "{v} outside [{lo}, {hi}]"
            );
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..25 {
        let width = rng.gen_range(1..48);
        let height = rng.gen_range(1..48);
        let samples = random_scan(&mut rng, width, height);

        let params = IdwParams::new(rng.gen_range(1.0..3.0), 1e-6);
        let parallel = interpolate_with(&samples, width, height, &params).unwrap();
        let sequential = interpolate_with(&samples, width, height, &params.sequential()).unwrap();

        // Same arithmetic per cell, so bit-identical
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn test_empty_scan_any_size() {
    for (w, h) in [(1, 1), (7, 3), (64, 64)] {
        let grid = interpolate(&[], w, h, 2.0, 1e-6).unwrap();
        assert_eq!(grid.len(), w * h);
        assert!(grid.values().iter().all(|v| v.is_nan()));
    }
}

#[test]
fn test_non_even_power_symmetry() {
    // Midpoint remains the average for any power
    for power in [0.5, 1.0, 1.5, 3.0, 6.0] {
        let grid = interpolate(&two_point_line(), 11, 1, power, 1e-6).unwrap();
        assert_approx_eq!(grid.get(5, 0).unwrap(), -60.0, 1e-4);
    }
}
