//! Sample and raster generators for synthetic scans.
//!
//! All generators are deterministic so failures reproduce.

use heatmap_common::{Raster, Rgb, Sample};

/// Samples on a ring around `(cx, cy)`, with values falling linearly from
/// `strongest` to `weakest` around the ring.
///
/// # Example
///
/// ```
/// use test_utils::sample_ring;
///
/// let samples = sample_ring(50.0, 50.0, 20.0, 8, -40.0, -80.0);
/// assert_eq!(samples.len(), 8);
/// assert_eq!(samples[0].value, -40.0);
/// ```
pub fn sample_ring(
    cx: f64,
    cy: f64,
    radius: f64,
    count: usize,
    strongest: f64,
    weakest: f64,
) -> Vec<Sample> {
    let step = if count > 1 {
        (weakest - strongest) / (count - 1) as f64
    } else {
        0.0
    };

    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU;
            Sample::new(
                cx + radius * angle.cos(),
                cy + radius * angle.sin(),
                strongest + step * i as f64,
            )
        })
        .collect()
}

/// Pseudo-random samples inside `width x height`, with integer RSSI-like
/// values in `[-95, -30]`.
///
/// Every fourth sample is snapped to an integer pixel so exact cell matches
/// are exercised.
pub fn random_samples(count: usize, width: usize, height: usize, seed: u32) -> Vec<Sample> {
    (0..count as u32)
        .map(|i| {
            let hx = simple_hash(i, 0, seed);
            let hy = simple_hash(i, 1, seed);
            let hv = simple_hash(i, 2, seed);

            let mut x = (hx % 10_000) as f64 / 10_000.0 * width as f64;
            let mut y = (hy % 10_000) as f64 / 10_000.0 * height as f64;
            if i % 4 == 0 {
                x = x.floor().min(width as f64 - 1.0);
                y = y.floor().min(height as f64 - 1.0);
            }
            let value = -95.0 + (hv % 66) as f64;

            Sample::new(x, y, value)
        })
        .collect()
}

/// Horizontal ramp from `left` to `right` color.
pub fn gradient_raster(width: usize, height: usize, left: Rgb, right: Rgb) -> Raster {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let t = if width > 1 {
                x as f32 / (width - 1) as f32
            } else {
                0.0
            };
            let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
            data.extend_from_slice(&[
                mix(left.r, right.r),
                mix(left.g, right.g),
                mix(left.b, right.b),
            ]);
        }
    }
    Raster::from_rgb_bytes(width, height, data)
        .unwrap_or_else(|e| panic!("gradient_raster({width}, {height}): {e}"))
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
