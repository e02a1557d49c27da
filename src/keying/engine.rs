use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    config::Config,
    error::Result,
    frame::{loader, types::Frame},
    keying::{
        compositor::Keyer,
        histogram::{estimate_dominant_color, DominantColor},
    },
};

/// How the engine chooses the thresholds to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// One composite at the given distance; `None` uses half the bucket width
    Single(Option<u32>),
    /// One composite per distance from 0 through the bucket width
    Sweep,
}

/// Summary of a finished keying run
#[derive(Debug)]
pub struct KeyingReport {
    /// Estimated dominant color of the foreground
    pub key: DominantColor,

    /// Width of one histogram bucket in channel units
    pub bucket_size: u32,

    /// Rendered thresholds with the files they were written to
    pub outputs: Vec<(u32, PathBuf)>,
}

/// Chroma-key pipeline
///
/// The engine runs the same sequence every time:
/// 1. Input Loading - read foreground and background, failing fast on bad paths
/// 2. Color Estimation - vote for the dominant foreground color
/// 3. Compositing - derive one composite per requested threshold
/// 4. Persistence - write each composite as it is produced
pub struct KeyingEngine {
    config: Config,
}

impl KeyingEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline and return what was produced
    pub fn run<P: AsRef<Path>>(
        &self,
        foreground_path: P,
        background_path: P,
        output_path: P,
        mode: ThresholdMode,
    ) -> Result<KeyingReport> {
        let foreground_path = foreground_path.as_ref();
        let background_path = background_path.as_ref();
        let output_path = output_path.as_ref();

        info!("Starting chroma-key composition");
        info!("   Foreground: {:?}", foreground_path);
        info!("   Background: {:?}", background_path);
        info!("   Output: {:?}", output_path);

        // Step 1: Input Loading
        let (foreground, background) = self.load_inputs(foreground_path, background_path)?;

        // Step 2: Color Estimation
        let (key, bucket_size) = self.estimate_key(&foreground)?;

        // Step 3 + 4: Compositing and Persistence
        let keyer = Keyer::new(foreground, background, key)?;
        let outputs = self.render(&keyer, bucket_size, output_path, mode)?;

        info!("Composition complete ({} file(s) written)", outputs.len());
        Ok(KeyingReport {
            key,
            bucket_size,
            outputs,
        })
    }

    /// Read both input images, rejecting missing or empty files before any
    /// compositing work starts
    fn load_inputs(&self, foreground: &Path, background: &Path) -> Result<(Frame, Frame)> {
        info!("Step 1: Loading input images...");

        let fg = loader::load_frame(foreground)?;
        info!("   Foreground: {}x{}", fg.width(), fg.height());

        let bg = loader::load_frame(background)?;
        info!("   Background: {}x{}", bg.width(), bg.height());

        Ok((fg, bg))
    }

    /// Vote for the dominant foreground color
    fn estimate_key(&self, foreground: &Frame) -> Result<(DominantColor, u32)> {
        info!("Step 2: Estimating dominant color...");

        let bucket_count = self.config.keying.bucket_count;
        let (key, bucket_size) = estimate_dominant_color(foreground, bucket_count)?;

        info!(
            "   Dominant color {} ({} buckets of width {})",
            key, bucket_count, bucket_size
        );
        Ok((key, bucket_size))
    }

    /// Derive and persist one composite per requested threshold
    ///
    /// Every threshold change recomputes the whole frame; nothing is reused
    /// between thresholds. Single mode overwrites the output path on each
    /// invocation, sweep mode writes a threshold-suffixed sibling per value so
    /// the whole range stays on disk.
    fn render(
        &self,
        keyer: &Keyer,
        bucket_size: u32,
        output_path: &Path,
        mode: ThresholdMode,
    ) -> Result<Vec<(u32, PathBuf)>> {
        info!("Step 3: Compositing...");

        let thresholds: Vec<u32> = match mode {
            ThresholdMode::Single(explicit) => {
                vec![explicit.unwrap_or(bucket_size / 2)]
            }
            ThresholdMode::Sweep => (0..=bucket_size).collect(),
        };

        let mut outputs = Vec::with_capacity(thresholds.len());
        for &threshold in &thresholds {
            let composite = keyer.composite(threshold);

            let path = match mode {
                ThresholdMode::Single(_) => output_path.to_path_buf(),
                ThresholdMode::Sweep => threshold_sibling(output_path, threshold),
            };

            loader::save_frame(&composite, &path)?;
            debug!("   threshold {:>3} -> {:?}", threshold, path);
            outputs.push((threshold, path));
        }

        Ok(outputs)
    }
}

/// Build `<stem>_t<threshold>.<ext>` next to `path`
fn threshold_sibling(path: &Path, threshold: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("composite");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    path.with_file_name(format!("{stem}_t{threshold}.{ext}"))
}
