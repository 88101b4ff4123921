//! Common test fixtures.
//!
//! Pre-defined scans and rasters representing typical floor-plan surveys.

use heatmap_common::{Raster, Rgb, Sample};

/// Two samples 10 px apart on row 0: strong on the left, weak on the right.
pub fn two_point_line() -> Vec<Sample> {
    vec![Sample::new(0.0, 0.0, -40.0), Sample::new(10.0, 0.0, -80.0)]
}

/// Four corners plus a center reading on a 400x400 plan.
pub fn office_scan() -> Vec<Sample> {
    vec![
        Sample::new(100.0, 100.0, -40.0),
        Sample::new(300.0, 100.0, -60.0),
        Sample::new(100.0, 300.0, -70.0),
        Sample::new(300.0, 300.0, -50.0),
        Sample::new(200.0, 200.0, -45.0),
    ]
}

/// Five readings spread over a 1000x700 plan.
pub fn warehouse_scan() -> Vec<Sample> {
    vec![
        Sample::new(150.0, 150.0, -45.0),
        Sample::new(800.0, 120.0, -60.0),
        Sample::new(500.0, 350.0, -50.0),
        Sample::new(250.0, 500.0, -75.0),
        Sample::new(850.0, 520.0, -80.0),
    ]
}

/// Single-color raster.
pub fn solid_raster(width: usize, height: usize, color: Rgb) -> Raster {
    Raster::new(width, height, color)
        .unwrap_or_else(|e| panic!("solid_raster({width}, {height}): {e}"))
}

/// White plan with a gray interior rectangle and a darker core, like a
/// simple floor plan.
pub fn floor_plan(width: usize, height: usize) -> Raster {
    let mut plan = solid_raster(width, height, Rgb::WHITE);
    let (mx, my) = (width / 8, height / 8);
    for y in my..height.saturating_sub(my) {
        for x in mx..width.saturating_sub(mx) {
            plan.set_pixel(x, y, Rgb::new(220, 220, 220));
        }
    }
    let (cx0, cy0) = (width * 3 / 8, height * 3 / 8);
    for y in cy0..height - cy0 {
        for x in cx0..width - cx0 {
            plan.set_pixel(x, y, Rgb::new(180, 180, 180));
        }
    }
    plan
}
