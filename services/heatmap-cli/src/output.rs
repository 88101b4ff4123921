//! Image decoding and PNG artifact writing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heatmap_common::Raster;
use tracing::info;

/// Decode a floor-plan image of any supported format into an RGB raster.
pub fn load_blueprint(path: &Path) -> Result<Raster> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode blueprint: {}", path.display()))?
        .to_rgb8();

    let (width, height) = (img.width() as usize, img.height() as usize);
    let raster = Raster::from_rgb_bytes(width, height, img.into_raw())?;

    info!(path = %path.display(), width, height, "Loaded blueprint");
    Ok(raster)
}

/// Output locations for one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutputs {
    pub heatmap: PathBuf,
    pub blended: PathBuf,
}

impl ScanOutputs {
    pub fn new(out_dir: &Path, scan_name: &str) -> Self {
        Self {
            heatmap: out_dir.join(format!("heatmap_{}.png", scan_name)),
            blended: out_dir.join(format!("blended_{}.png", scan_name)),
        }
    }
}

/// Encode `raster` as PNG and write it to `path`.
pub fn write_png(path: &Path, raster: &Raster) -> Result<()> {
    let png = renderer::png::encode_raster(raster)?;
    std::fs::write(path, &png)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;

    info!(path = %path.display(), size = png.len(), "Wrote image");
    Ok(())
}
