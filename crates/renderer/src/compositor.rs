//! Alpha compositing of a heatmap onto a background image.

use heatmap_common::{HeatmapError, HeatmapResult, Raster};
use tracing::debug;

/// Resample a raster with bilinear interpolation.
///
/// Pixel centers are aligned (`src = (dst + 0.5) * scale - 0.5`) and source
/// coordinates are clamped to the edge, so any source size, including a
/// single pixel, maps onto any destination size.
pub fn resample_bilinear(
    src: &Raster,
    dst_width: usize,
    dst_height: usize,
) -> HeatmapResult<Raster> {
    let (src_width, src_height) = src.dimensions();
    if (src_width, src_height) == (dst_width, dst_height) {
        // No resampling needed
        return Ok(src.clone());
    }
    heatmap_common::check_dimensions(dst_width, dst_height)?;

    let data = src.as_bytes();
    let mut output = vec![0u8; dst_width * dst_height * 3];

    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;
    let max_x = (src_width - 1) as f32;
    let max_y = (src_height - 1) as f32;

    for y in 0..dst_height {
        let src_y = ((y as f32 + 0.5) * y_ratio - 0.5).clamp(0.0, max_y);
        let y1 = src_y.floor() as usize;
        let y2 = (y1 + 1).min(src_height - 1);
        let dy = src_y - y1 as f32;

        for x in 0..dst_width {
            let src_x = ((x as f32 + 0.5) * x_ratio - 0.5).clamp(0.0, max_x);
            let x1 = src_x.floor() as usize;
            let x2 = (x1 + 1).min(src_width - 1);
            let dx = src_x - x1 as f32;

            let i11 = (y1 * src_width + x1) * 3;
            let i21 = (y1 * src_width + x2) * 3;
            let i12 = (y2 * src_width + x1) * 3;
            let i22 = (y2 * src_width + x2) * 3;
            let out = (y * dst_width + x) * 3;

            for c in 0..3 {
                let v1 = data[i11 + c] as f32 * (1.0 - dx) + data[i21 + c] as f32 * dx;
                let v2 = data[i12 + c] as f32 * (1.0 - dx) + data[i22 + c] as f32 * dx;
                let value = v1 * (1.0 - dy) + v2 * dy;
                output[out + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Raster::from_rgb_bytes(dst_width, dst_height, output)
}

/// Blend `foreground` over `background` with weight `alpha`.
///
/// The output has the background's dimensions; a differently sized
/// foreground is resampled first. Each channel is
/// `round(clamp(alpha * fg + (1 - alpha) * bg, 0, 255))`. `alpha` is not
/// clamped, so values outside `[0, 1]` extrapolate.
pub fn blend(background: &Raster, foreground: &Raster, alpha: f32) -> HeatmapResult<Raster> {
    let (width, height) = background.dimensions();

    let resized;
    let foreground = if foreground.same_size(background) {
        foreground
    } else {
        debug!(
            from_width = foreground.width(),
            from_height = foreground.height(),
            to_width = width,
            to_height = height,
            "Resampling foreground to background size"
        );
        resized = resample_bilinear(foreground, width, height)?;
        &resized
    };

    let inv_alpha = 1.0 - alpha;
    let pixels: Vec<u8> = background
        .as_bytes()
        .iter()
        .zip(foreground.as_bytes())
        .map(|(&bg, &fg)| {
            let value = alpha * fg as f32 + inv_alpha * bg as f32;
            value.clamp(0.0, 255.0).round() as u8
        })
        .collect();

    Raster::from_rgb_bytes(width, height, pixels)
}

/// [`blend`] for callers that may not have both rasters yet.
///
/// A missing raster is an error; a blank image is never substituted.
pub fn blend_optional(
    background: Option<&Raster>,
    foreground: Option<&Raster>,
    alpha: f32,
) -> HeatmapResult<Raster> {
    let background =
        background.ok_or_else(|| HeatmapError::invalid_argument("background raster is missing"))?;
    let foreground =
        foreground.ok_or_else(|| HeatmapError::invalid_argument("foreground raster is missing"))?;
    blend(background, foreground, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::Rgb;

    fn solid(width: usize, height: usize, color: Rgb) -> Raster {
        Raster::new(width, height, color).unwrap()
    }

    #[test]
    fn test_resample_single_pixel() {
        let src = solid(1, 1, Rgb::new(12, 200, 99));
        let dst = resample_bilinear(&src, 4, 4).unwrap();
        assert_eq!(dst.dimensions(), (4, 4));
        assert!(dst.pixels().all(|p| p == Rgb::new(12, 200, 99)));
    }

    #[test]
    fn test_resample_downscale_to_single_pixel() {
        let mut src = solid(2, 2, Rgb::BLACK);
        src.set_pixel(1, 0, Rgb::WHITE);
        src.set_pixel(0, 1, Rgb::WHITE);
        let dst = resample_bilinear(&src, 1, 1).unwrap();
        // Center of a 2x2 checker is the average
        assert_eq!(dst.pixel(0, 0), Some(Rgb::new(128, 128, 128)));
    }

    #[test]
    fn test_resample_upscale_keeps_corners() {
        let mut src = solid(2, 1, Rgb::BLACK);
        src.set_pixel(1, 0, Rgb::new(200, 100, 0));
        let dst = resample_bilinear(&src, 8, 1).unwrap();
        assert_eq!(dst.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(dst.pixel(7, 0), Some(Rgb::new(200, 100, 0)));
        // Monotonic in between
        let reds: Vec<u8> = dst.pixels().map(|p| p.r).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_resample_zero_target_rejected() {
        let src = solid(2, 2, Rgb::WHITE);
        assert!(resample_bilinear(&src, 0, 3).is_err());
    }

    #[test]
    fn test_blend_midpoint() {
        let bg = solid(2, 2, Rgb::WHITE);
        let fg = solid(2, 2, Rgb::new(255, 0, 0));
        let out = blend(&bg, &fg, 0.5).unwrap();
        assert!(out.pixels().all(|p| p == Rgb::new(255, 128, 128)));
    }

    #[test]
    fn test_blend_alpha_extremes() {
        let bg = solid(3, 2, Rgb::new(10, 20, 30));
        let fg = solid(3, 2, Rgb::new(200, 150, 100));
        assert_eq!(blend(&bg, &fg, 0.0).unwrap(), bg);
        assert_eq!(blend(&bg, &fg, 1.0).unwrap(), fg);
    }

    #[test]
    fn test_blend_alpha_outside_unit_interval_extrapolates() {
        let bg = solid(1, 1, Rgb::new(100, 100, 100));
        let fg = solid(1, 1, Rgb::new(200, 0, 150));
        let out = blend(&bg, &fg, 1.5).unwrap();
        // 1.5 * fg - 0.5 * bg, clamped
        assert_eq!(out.pixel(0, 0), Some(Rgb::new(250, 0, 175)));
        let out = blend(&bg, &fg, -1.0).unwrap();
        assert_eq!(out.pixel(0, 0), Some(Rgb::new(0, 200, 50)));
    }

    #[test]
    fn test_blend_resizes_foreground() {
        let bg = solid(4, 3, Rgb::BLACK);
        let fg = solid(1, 1, Rgb::new(100, 50, 0));
        let out = blend(&bg, &fg, 1.0).unwrap();
        assert_eq!(out.dimensions(), (4, 3));
        assert!(out.pixels().all(|p| p == Rgb::new(100, 50, 0)));
    }

    #[test]
    fn test_blend_does_not_mutate_inputs() {
        let bg = solid(2, 2, Rgb::WHITE);
        let fg = solid(2, 2, Rgb::BLACK);
        let (bg_copy, fg_copy) = (bg.clone(), fg.clone());
        let _ = blend(&bg, &fg, 0.3).unwrap();
        assert_eq!(bg, bg_copy);
        assert_eq!(fg, fg_copy);
    }

    #[test]
    fn test_blend_optional_missing_rasters() {
        let r = solid(1, 1, Rgb::WHITE);
        let err = blend_optional(None, Some(&r), 0.5).unwrap_err();
        assert!(err.to_string().contains("background"));
        let err = blend_optional(Some(&r), None, 0.5).unwrap_err();
        assert!(err.to_string().contains("foreground"));
        assert!(blend_optional(Some(&r), Some(&r), 0.5).is_ok());
    }
}
