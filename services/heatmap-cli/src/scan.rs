//! Loading scan point lists.

use std::path::Path;

use anyhow::{Context, Result};
use heatmap_common::Sample;
use tracing::{info, warn};

/// Load the samples of a scan from a JSON point list.
///
/// Accepts the scan tool's format (`[{"x", "y", "signal", "time"}, ...]`) as
/// well as plain `{"x", "y", "value"}` objects. Points with non-finite
/// fields are dropped with a warning.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read points file: {}", path.display()))?;
    let samples = parse_samples(&content)
        .with_context(|| format!("Failed to parse points file: {}", path.display()))?;

    info!(path = %path.display(), count = samples.len(), "Loaded scan points");
    Ok(samples)
}

/// Parse a JSON point list, dropping non-finite points.
pub fn parse_samples(json: &str) -> Result<Vec<Sample>> {
    let parsed: Vec<Sample> = serde_json::from_str(json)?;
    let total = parsed.len();

    let samples: Vec<Sample> = parsed
        .into_iter()
        .filter(|s| s.x.is_finite() && s.y.is_finite() && s.value.is_finite())
        .collect();

    if samples.len() != total {
        warn!(
            dropped = total - samples.len(),
            "Ignoring points with non-finite coordinates or values"
        );
    }

    Ok(samples)
}

/// Default scan name: the current UTC time as `YYYYMMDD_HHMMSS`.
pub fn default_scan_name() -> String {
    chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string()
}
