//! Configuration for heatmap generation.

use std::path::Path;

use heatmap_common::{HeatmapError, HeatmapResult};
use interpolation::IdwParams;
use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Tuning knobs for the heatmap pipeline.
///
/// The color range floor/ceiling default to typical Wi-Fi RSSI bounds in
/// dBm; set them to match whatever unit the samples are in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// IDW distance exponent.
    pub power: f64,

    /// IDW weight regularizer.
    pub epsilon: f64,

    /// Lowest value the color scale may start at.
    pub range_floor: f32,

    /// Highest value the color scale may end at.
    pub range_ceiling: f32,

    /// Built-in palette name.
    pub palette: String,

    /// Heatmap opacity when composited over a background.
    pub alpha: f32,

    /// Interpolate rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            power: interpolation::params::DEFAULT_POWER,
            epsilon: interpolation::params::DEFAULT_EPSILON,
            range_floor: -100.0,
            range_ceiling: -30.0,
            palette: "jet".to_string(),
            alpha: 0.5,
            parallel: true,
        }
    }
}

impl HeatmapConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from `HEATMAP_*` environment variables.
    ///
    /// Unparsable values are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("HEATMAP_POWER") {
            if let Ok(power) = val.parse() {
                self.power = power;
            }
        }

        if let Ok(val) = std::env::var("HEATMAP_EPSILON") {
            if let Ok(epsilon) = val.parse() {
                self.epsilon = epsilon;
            }
        }

        if let Ok(val) = std::env::var("HEATMAP_RANGE_FLOOR") {
            if let Ok(floor) = val.parse() {
                self.range_floor = floor;
            }
        }

        if let Ok(val) = std::env::var("HEATMAP_RANGE_CEILING") {
            if let Ok(ceiling) = val.parse() {
                self.range_ceiling = ceiling;
            }
        }

        if let Ok(val) = std::env::var("HEATMAP_PALETTE") {
            self.palette = val;
        }

        if let Ok(val) = std::env::var("HEATMAP_ALPHA") {
            if let Ok(alpha) = val.parse() {
                self.alpha = alpha;
            }
        }

        if let Ok(val) = std::env::var("HEATMAP_PARALLEL") {
            self.parallel = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> HeatmapResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| HeatmapError::Config(format!("YAML error: {}", e)))
    }

    /// Load a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| HeatmapError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HeatmapResult<()> {
        self.idw_params()
            .validate()
            .map_err(|e| HeatmapError::Config(e.to_string()))?;

        if !self.range_floor.is_finite() || !self.range_ceiling.is_finite() {
            return Err(HeatmapError::Config(
                "range_floor and range_ceiling must be finite".to_string(),
            ));
        }

        if self.range_floor >= self.range_ceiling {
            return Err(HeatmapError::Config(format!(
                "range_floor ({}) must be below range_ceiling ({})",
                self.range_floor, self.range_ceiling
            )));
        }

        if !self.alpha.is_finite() {
            return Err(HeatmapError::Config("alpha must be finite".to_string()));
        }

        self.resolve_palette()?;

        Ok(())
    }

    /// IDW parameters derived from this configuration.
    pub fn idw_params(&self) -> IdwParams {
        IdwParams {
            power: self.power,
            epsilon: self.epsilon,
            parallel: self.parallel,
        }
    }

    /// Look up the configured palette.
    pub fn resolve_palette(&self) -> HeatmapResult<Palette> {
        Palette::by_name(&self.palette)
    }
}
