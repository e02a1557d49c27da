//! # Image Frame Module
//!
//! Pixel buffers, fail-fast image IO, and the simple per-pixel edits used by
//! the demo binaries.

pub mod loader;
pub mod ops;
pub mod types;

pub use loader::{load_frame, load_gray, save_frame, save_gray};
pub use types::Frame;
