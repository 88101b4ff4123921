//! False-color lookup tables.
//!
//! A [`Palette`] is an immutable 256-entry table. It is passed explicitly to
//! the color mapper, so concurrent renders with different palettes never
//! share state.

use heatmap_common::{HeatmapError, HeatmapResult, Rgb};
use serde::{Deserialize, Serialize};

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 256;

/// Color stop for building a palette from a gradient definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub position: f32,
    /// `#rrggbb` hex color.
    pub color: String,
}

impl ColorStop {
    pub fn new(position: f32, color: impl Into<String>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }
}

/// A 256-entry false-color lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::jet()
    }
}

impl Palette {
    /// Blue → cyan → yellow → red, dark at both ends.
    pub fn jet() -> Self {
        Self::from_fn(|t| {
            let four_t = 4.0 * t;
            let channel = |k: f32| {
                let v = (1.5 - (four_t - k).abs()).clamp(0.0, 1.0);
                (v * 255.0).round() as u8
            };
            Rgb::new(channel(3.0), channel(2.0), channel(1.0))
        })
    }

    /// Black → white.
    pub fn grayscale() -> Self {
        Self::from_fn(|t| {
            let v = (t * 255.0).round() as u8;
            Rgb::new(v, v, v)
        })
    }

    /// Resolve a built-in palette by name (case-insensitive).
    pub fn by_name(name: &str) -> HeatmapResult<Self> {
        match name.to_lowercase().as_str() {
            "jet" => Ok(Self::jet()),
            "gray" | "grey" | "grayscale" | "greyscale" => Ok(Self::grayscale()),
            _ => Err(HeatmapError::UnknownPalette(name.to_string())),
        }
    }

    /// Build a palette by linear interpolation between color stops.
    ///
    /// Stops are sorted by position. Entries before the first stop take its
    /// color, entries after the last stop take the last color.
    pub fn from_stops(stops: &[ColorStop]) -> HeatmapResult<Self> {
        if stops.is_empty() {
            return Err(HeatmapError::invalid_argument("palette needs at least one color stop"));
        }

        let mut parsed = Vec::with_capacity(stops.len());
        for stop in stops {
            if !stop.position.is_finite() {
                return Err(HeatmapError::invalid_argument(format!(
                    "color stop position must be finite, got {}",
                    stop.position
                )));
            }
            let color = Rgb::from_hex(&stop.color).ok_or_else(|| {
                HeatmapError::invalid_argument(format!("invalid hex color '{}'", stop.color))
            })?;
            parsed.push((stop.position, color));
        }
        parsed.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(Self::from_fn(|t| {
            let first = parsed[0];
            let last = parsed[parsed.len() - 1];
            if t <= first.0 {
                return first.1;
            }
            if t >= last.0 {
                return last.1;
            }

            for pair in parsed.windows(2) {
                let (p0, c0) = pair[0];
                let (p1, c1) = pair[1];
                if t >= p0 && t <= p1 {
                    let span = p1 - p0;
                    let frac = if span > 0.0 { (t - p0) / span } else { 0.0 };
                    return interpolate_color(c0, c1, frac);
                }
            }

            last.1
        }))
    }

    fn from_fn(f: impl Fn(f32) -> Rgb) -> Self {
        let mut colors = [Rgb::BLACK; PALETTE_SIZE];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = f(i as f32 / (PALETTE_SIZE - 1) as f32);
        }
        Self { colors }
    }

    /// Quantize a normalized value to a table index: `round(clamp(t) * 255)`.
    ///
    /// NaN maps to index 0; callers that care about undefined cells must
    /// check for them before lookup.
    #[inline]
    pub fn index_for(t: f32) -> u8 {
        if t.is_nan() {
            return 0;
        }
        (t.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Color for a normalized value in `[0, 1]`.
    #[inline]
    pub fn lookup(&self, t: f32) -> Rgb {
        self.colors[Self::index_for(t) as usize]
    }

    /// Color at a raw table index.
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }
}

/// Linear color interpolation
fn interpolate_color(color1: Rgb, color2: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Rgb::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
    )
}
