//! # Chroma-Compositor
//!
//! Histogram-driven chroma-key compositing with companion image-filtering and
//! feature-matching demos.
//!
//! The core estimates the dominant color of a foreground image with a coarse
//! 3D color histogram, then replaces every pixel near that color with the
//! corresponding pixel of a (periodically tiled) background image.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chroma_compositor::{
//!     config::Config,
//!     keying::{KeyingEngine, ThresholdMode},
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let engine = KeyingEngine::new(Config::default());
//! let report = engine.run(
//!     "foreground.jpg",
//!     "background.jpg",
//!     "overlay.jpg",
//!     ThresholdMode::Single(None),
//! )?;
//! println!("keyed on {}", report.key);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`frame`] - Pixel buffers, image IO, and simple per-pixel edits
//! - [`keying`] - Color histogram, dominant-color vote, and the compositor
//! - [`vision`] - Narrow seams over the external vision library
//! - [`config`] - Configuration management
//!
//! ## Swapping the vision backend
//!
//! The demo binaries only depend on the seam traits, so a different vision
//! library slots in by implementing them:
//!
//! ```rust,no_run
//! use chroma_compositor::vision::Smoother;
//! use chroma_compositor::error::Result;
//! use image::GrayImage;
//!
//! struct MyBackend;
//!
//! impl Smoother for MyBackend {
//!     fn blur(&self, image: &GrayImage, sigma: f32) -> Result<GrayImage> {
//!         // Your smoothing implementation
//!         Ok(image.clone())
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod keying;
pub mod vision;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{CompositorError, Result},
    frame::Frame,
    keying::{estimate_dominant_color, DominantColor, Keyer, KeyingEngine, ThresholdMode},
    vision::ImageprocVision,
};
