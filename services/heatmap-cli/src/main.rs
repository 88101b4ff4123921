//! Heatmap CLI.
//!
//! Interpolates a scan's point list onto a pixel grid, writes the colorized
//! heatmap and, when a floor plan is given, the heatmap blended over it.

mod output;
mod scan;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use heatmap_common::Raster;
use renderer::{blend, generate_heatmap, HeatmapConfig};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::output::{load_blueprint, write_png, ScanOutputs};

#[derive(Parser, Debug)]
#[command(name = "heatmap-cli")]
#[command(about = "Render signal-strength heatmaps from scan points")]
struct Args {
    /// JSON point list (`[{"x", "y", "signal"}, ...]`)
    #[arg(short, long)]
    points: PathBuf,

    /// Floor-plan image; sets the output size and enables the blended output
    #[arg(short, long)]
    blueprint: Option<PathBuf>,

    /// Output width when no blueprint is given
    #[arg(long)]
    width: Option<usize>,

    /// Output height when no blueprint is given
    #[arg(long)]
    height: Option<usize>,

    /// Directory the PNGs are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Scan name used in output file names (default: UTC timestamp)
    #[arg(short, long)]
    name: Option<String>,

    /// YAML configuration file
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Heatmap opacity over the blueprint
    #[arg(long)]
    alpha: Option<f32>,

    /// IDW distance exponent
    #[arg(long)]
    power: Option<f64>,

    /// Palette name (jet, grayscale)
    #[arg(long)]
    palette: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Layer flags over the file/env configuration.
    fn apply_overrides(&self, config: &mut HeatmapConfig) {
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(power) = self.power {
            config.power = power;
        }
        if let Some(palette) = &self.palette {
            config.palette = palette.clone();
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    let config = load_config(&args)?;
    info!(
        power = config.power,
        palette = %config.palette,
        alpha = config.alpha,
        "Configuration loaded"
    );

    run(&args, &config)
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder().with_max_level(level);
    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<HeatmapConfig> {
    let mut config = match &args.config {
        Some(path) => HeatmapConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => HeatmapConfig::default(),
    };

    config.apply_env();
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

fn run(args: &Args, config: &HeatmapConfig) -> Result<()> {
    let samples = scan::load_samples(&args.points)?;
    if samples.is_empty() {
        warn!("Point list is empty, heatmap will be black");
    }

    let blueprint = args
        .blueprint
        .as_deref()
        .map(load_blueprint)
        .transpose()?;

    let (width, height) = output_dimensions(blueprint.as_ref(), args.width, args.height)?;

    let scan_name = args.name.clone().unwrap_or_else(scan::default_scan_name);
    std::fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("Failed to create output directory: {}", args.out_dir.display())
    })?;
    let outputs = ScanOutputs::new(&args.out_dir, &scan_name);

    let heatmap = generate_heatmap(&samples, width, height, config)?;
    write_png(&outputs.heatmap, &heatmap)?;

    if let Some(background) = &blueprint {
        let blended = blend(background, &heatmap, config.alpha)?;
        write_png(&outputs.blended, &blended)?;
    }

    info!(
        scan = %scan_name,
        samples = samples.len(),
        width,
        height,
        "Heatmap generated"
    );

    Ok(())
}

/// The blueprint's size wins; otherwise both `--width` and `--height` are required.
fn output_dimensions(
    blueprint: Option<&Raster>,
    width: Option<usize>,
    height: Option<usize>,
) -> Result<(usize, usize)> {
    if let Some(raster) = blueprint {
        if width.is_some() || height.is_some() {
            warn!("Ignoring --width/--height, using blueprint dimensions");
        }
        return Ok(raster.dimensions());
    }

    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => bail!("Output size unknown: pass --blueprint or both --width and --height"),
    }
}
