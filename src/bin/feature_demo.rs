//! Feature detection and matching walkthrough: detect keypoints in two
//! images, compute binary descriptors, pair them with a brute-force matcher,
//! and write keypoint and match visualisations to disk.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

use chroma_compositor::{
    config::Config,
    frame::{self, ops},
    vision::{draw, FeatureExtractor, FeatureMatcher, ImageprocVision},
};

#[derive(Parser)]
#[command(
    name = "feature-demo",
    version,
    about = "Detect, describe, and match keypoints between two images"
)]
struct Cli {
    /// First input image
    #[arg(long, default_value = "kittens1.jpg")]
    left: PathBuf,

    /// Second input image
    #[arg(long, default_value = "kittens2.jpg")]
    right: PathBuf,

    /// Directory receiving the visualisations
    #[arg(short, long, default_value = "feature-out")]
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
    let vision = ImageprocVision::with_features(config.features.clone());

    info!("Loading {:?} and {:?}", cli.left, cli.right);
    let left = frame::load_frame(&cli.left)?;
    let right = frame::load_frame(&cli.right)?;

    // Detect keypoints and compute descriptors
    let left_features = vision.detect_and_describe(&ops::to_grayscale(&left))?;
    let right_features = vision.detect_and_describe(&ops::to_grayscale(&right))?;
    info!(
        "Detected {} keypoints in {:?}, {} in {:?}",
        left_features.len(),
        cli.left,
        right_features.len(),
        cli.right
    );

    frame::save_frame(
        &draw::draw_keypoints(&left, left_features.keypoints()),
        cli.outdir.join("keypoints_left.png"),
    )?;
    frame::save_frame(
        &draw::draw_keypoints(&right, right_features.keypoints()),
        cli.outdir.join("keypoints_right.png"),
    )?;

    if left_features.is_empty() || right_features.is_empty() {
        warn!("Nothing to match; keypoint images were still written");
        return Ok(());
    }

    // Pair descriptors between the two images
    let matches = vision.match_features(&left_features, &right_features)?;
    info!("Matched {} descriptor pairs", matches.len());

    let canvas = draw::draw_matches(&left, &right, &matches);
    let matches_path = cli.outdir.join("matches.png");
    frame::save_frame(&canvas, &matches_path)?;

    info!("Match visualisation saved to: {:?}", matches_path);
    Ok(())
}
