//! # Vision Primitive Seams
//!
//! Narrow interfaces over the external vision library. The demo binaries only
//! ever talk to these traits, so the backing library can be swapped without
//! touching any call site. The default backend delegates to `imageproc`.

pub mod backend;
pub mod draw;
pub mod traits;
pub mod types;

pub use backend::ImageprocVision;
pub use traits::{EdgeDetector, FeatureExtractor, FeatureMatcher, Smoother};
pub use types::{FeatureMatch, FeatureSet, KeyPoint};
