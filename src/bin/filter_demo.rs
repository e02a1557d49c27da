//! Image filtering walkthrough: flips, grayscale conversion, Gaussian
//! smoothing, edge detection with a sigma sweep, brightness adjustment, and
//! weighted blending. Every stage is written to the output directory instead
//! of a window.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

use chroma_compositor::{
    config::Config,
    frame::{self, ops, Frame},
    vision::{EdgeDetector, ImageprocVision, Smoother},
};

#[derive(Parser)]
#[command(
    name = "filter-demo",
    version,
    about = "Run the basic filter pipeline over an image and write every stage to disk"
)]
struct Cli {
    /// Input image path
    #[arg(short, long, default_value = "dozer.jpg")]
    input: PathBuf,

    /// Second image for the blending stage (skipped when absent)
    #[arg(long)]
    blend_with: Option<PathBuf>,

    /// Directory receiving the rendered stages
    #[arg(short, long, default_value = "filter-out")]
    outdir: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let config = match cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    std::fs::create_dir_all(&cli.outdir)?;
    let vision = ImageprocVision::new();

    info!("Loading {:?}", cli.input);
    let original = frame::load_frame(&cli.input)?;

    render_flips(&original, &cli.outdir)?;
    let gray = render_grayscale(&original, &cli.outdir)?;
    render_edges(&vision, &gray, &config, &cli.outdir)?;
    render_sigma_sweep(&vision, &gray, &config, &cli.outdir)?;
    render_brightened(&original, &config, &cli.outdir)?;

    if let Some(other_path) = cli.blend_with {
        render_blend(&original, &other_path, &config, &cli.outdir)?;
    }

    info!("All stages written to {:?}", cli.outdir);
    Ok(())
}

/// Mirror the image across each axis and both at once
fn render_flips(original: &Frame, outdir: &Path) -> Result<()> {
    info!("Flipping image");
    frame::save_frame(&ops::flip_horizontal(original), outdir.join("flipped_horizontal.png"))?;
    frame::save_frame(&ops::flip_vertical(original), outdir.join("flipped_vertical.png"))?;
    frame::save_frame(&ops::flip_both(original), outdir.join("flipped_both.png"))?;
    Ok(())
}

fn render_grayscale(original: &Frame, outdir: &Path) -> Result<image::GrayImage> {
    info!("Converting to grayscale");
    let gray = ops::to_grayscale(original);
    frame::save_gray(&gray, outdir.join("grayscale.png"))?;
    Ok(gray)
}

/// Blur, then detect edges on the blurred image
fn render_edges(
    vision: &ImageprocVision,
    gray: &image::GrayImage,
    config: &Config,
    outdir: &Path,
) -> Result<()> {
    info!("Smoothing with sigma {}", config.filter.blur_sigma);
    let blurred = vision.blur(gray, config.filter.blur_sigma)?;
    frame::save_gray(&blurred, outdir.join("blurred.png"))?;

    info!(
        "Detecting edges ({}..{})",
        config.filter.canny_low, config.filter.canny_high
    );
    let edges = vision.detect_edges(&blurred, config.filter.canny_low, config.filter.canny_high)?;
    frame::save_gray(&edges, outdir.join("edges.png"))?;
    Ok(())
}

/// Re-render the edge map once per smoothing level
///
/// Sigma zero is skipped with a warning rather than aborting the sweep, so
/// the remaining levels still render.
fn render_sigma_sweep(
    vision: &ImageprocVision,
    gray: &image::GrayImage,
    config: &Config,
    outdir: &Path,
) -> Result<()> {
    info!("Edge sweep up to sigma {}", config.filter.max_sigma);

    for sigma in 0..=config.filter.max_sigma {
        let blurred = match vision.blur(gray, sigma as f32) {
            Ok(blurred) => blurred,
            Err(e) => {
                warn!("Skipping sigma {}: {}", sigma, e);
                continue;
            }
        };

        let edges =
            vision.detect_edges(&blurred, config.filter.canny_low, config.filter.canny_high)?;
        frame::save_gray(&edges, outdir.join(format!("edges_sigma_{sigma}.png")))?;
    }

    Ok(())
}

fn render_brightened(original: &Frame, config: &Config, outdir: &Path) -> Result<()> {
    info!("Brightening by {}", config.filter.brighten_beta);
    let brightened = ops::brighten(original, config.filter.brighten_beta);
    frame::save_frame(&brightened, outdir.join("brightened.png"))?;
    Ok(())
}

fn render_blend(
    original: &Frame,
    other_path: &Path,
    config: &Config,
    outdir: &Path,
) -> Result<()> {
    info!("Blending with {:?}", other_path);
    let other = frame::load_frame(other_path)?;
    let blended = ops::blend(original, &other, config.filter.blend_alpha)?;
    frame::save_frame(&blended, outdir.join("blended.png"))?;
    Ok(())
}
