use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use chroma_compositor::{
    config::Config,
    keying::{KeyingEngine, ThresholdMode},
};

#[derive(Parser)]
#[command(
    name = "chroma-compositor",
    version,
    about = "Replace the dominant color of a foreground image with a tiled background",
    long_about = "Chroma-Compositor votes for the most common foreground color with a coarse \
                  3D color histogram, then swaps every pixel within a channel-space distance \
                  of that color for the corresponding background pixel, tiling the background \
                  when it is smaller than the foreground."
)]
struct Cli {
    /// Foreground image path
    #[arg(short, long, default_value = "foreground.jpg")]
    foreground: PathBuf,

    /// Background image path
    #[arg(short, long, default_value = "background.jpg")]
    background: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "overlay.jpg")]
    output: PathBuf,

    /// Keying distance in channel units (defaults to half the bucket width)
    #[arg(short, long)]
    threshold: Option<u32>,

    /// Render every threshold from 0 through the bucket width
    #[arg(short, long, conflicts_with = "threshold")]
    sweep: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting Chroma-Compositor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    let mode = if cli.sweep {
        ThresholdMode::Sweep
    } else {
        ThresholdMode::Single(cli.threshold)
    };

    let engine = KeyingEngine::new(config);
    let report = engine.run(&cli.foreground, &cli.background, &cli.output, mode)?;

    if let Some((threshold, path)) = report.outputs.last() {
        info!(
            "Keyed on {} (final threshold {}); output saved to: {:?}",
            report.key, threshold, path
        );
    }
    Ok(())
}
