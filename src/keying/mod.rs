//! # Chroma-Key Module
//!
//! The core of the crate: a coarse 3D color histogram that votes for the
//! dominant foreground color, and a compositor that replaces everything near
//! that color with a periodically tiled background.

pub mod compositor;
pub mod engine;
pub mod histogram;

pub use compositor::Keyer;
pub use engine::{KeyingEngine, KeyingReport, ThresholdMode};
pub use histogram::{estimate_dominant_color, ColorHistogram, DominantColor};
