//! Samples → grid → colorized raster.

use heatmap_common::{Grid, HeatmapResult, Raster, Sample};
use interpolation::interpolate_with;
use tracing::debug;

use crate::colormap::{colorize, ValueRange};
use crate::compositor::blend;
use crate::config::HeatmapConfig;

/// Interpolate `samples` onto a `width x height` grid and colorize it.
///
/// The color range is data-driven but clamped to the configured
/// floor/ceiling (see [`ValueRange::resolve`]). An empty sample list yields
/// an all-black raster.
pub fn generate_heatmap(
    samples: &[Sample],
    width: usize,
    height: usize,
    config: &HeatmapConfig,
) -> HeatmapResult<Raster> {
    generate_heatmap_with_grid(samples, width, height, config).map(|(_, raster)| raster)
}

/// Like [`generate_heatmap`], also returning the raw interpolated grid.
pub fn generate_heatmap_with_grid(
    samples: &[Sample],
    width: usize,
    height: usize,
    config: &HeatmapConfig,
) -> HeatmapResult<(Grid, Raster)> {
    let palette = config.resolve_palette()?;
    let grid = interpolate_with(samples, width, height, &config.idw_params())?;

    let range = ValueRange::resolve(&grid, config.range_floor, config.range_ceiling);
    debug!(
        samples = samples.len(),
        vmin = range.min,
        vmax = range.max,
        "Resolved color range"
    );

    let raster = colorize(&grid, Some(range.min), Some(range.max), &palette)?;
    Ok((grid, raster))
}

/// Render a heatmap at the background's size and blend it on top with
/// `config.alpha`.
pub fn compose_overlay(
    background: &Raster,
    samples: &[Sample],
    config: &HeatmapConfig,
) -> HeatmapResult<Raster> {
    let heatmap = generate_heatmap(samples, background.width(), background.height(), config)?;
    blend(background, &heatmap, config.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use heatmap_common::{HeatmapError, Rgb};

    #[test]
    fn test_empty_samples_black_raster() {
        let raster = generate_heatmap(&[], 7, 5, &HeatmapConfig::default()).unwrap();
        assert_eq!(raster.dimensions(), (7, 5));
        assert!(raster.pixels().all(|p| p == Rgb::BLACK));
    }

    #[test]
    fn test_sample_pixels_use_clamped_range() {
        let samples = [Sample::new(0.0, 0.0, -40.0), Sample::new(10.0, 0.0, -80.0)];
        let config = HeatmapConfig::default();
        let (grid, raster) = generate_heatmap_with_grid(&samples, 11, 1, &config).unwrap();

        assert_eq!(grid.get(0, 0), Some(-40.0));
        let jet = Palette::jet();
        // Range is exactly [-80, -40], inside the default floor/ceiling
        assert_eq!(raster.pixel(0, 0), Some(jet.color(255)));
        assert_eq!(raster.pixel(10, 0), Some(jet.color(0)));
    }

    #[test]
    fn test_single_sample_falls_back_to_floor_ceiling() {
        let samples = [Sample::new(1.0, 1.0, -65.0)];
        let config = HeatmapConfig::default();
        let raster = generate_heatmap(&samples, 3, 3, &config).unwrap();
        // (-65 - -100) / 70 = 0.5
        let expected = Palette::jet().lookup(0.5);
        assert!(raster.pixels().all(|p| p == expected));
    }

    #[test]
    fn test_unknown_palette_is_error() {
        let config = HeatmapConfig {
            palette: "rainbow".to_string(),
            ..HeatmapConfig::default()
        };
        let err = generate_heatmap(&[], 2, 2, &config).unwrap_err();
        assert!(matches!(err, HeatmapError::UnknownPalette(_)));
    }

    #[test]
    fn test_invalid_dimensions() {
        let samples = [Sample::new(0.0, 0.0, -50.0)];
        let err = generate_heatmap(&samples, 0, 10, &HeatmapConfig::default()).unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidDimension { .. }));
    }

    #[test]
    fn test_compose_overlay_matches_background_size() {
        let background = Raster::new(6, 4, Rgb::WHITE).unwrap();
        let samples = [Sample::new(0.0, 0.0, -40.0), Sample::new(5.0, 3.0, -90.0)];
        let out = compose_overlay(&background, &samples, &HeatmapConfig::default()).unwrap();
        assert_eq!(out.dimensions(), (6, 4));
        assert_ne!(out, background);
    }
}
