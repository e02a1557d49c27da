use image::GrayImage;

use crate::{
    error::Result,
    vision::types::{FeatureMatch, FeatureSet},
};

/// Gaussian smoothing seam
pub trait Smoother {
    /// Blur `image` with the given standard deviation
    ///
    /// A non-positive sigma is rejected rather than silently ignored.
    fn blur(&self, image: &GrayImage, sigma: f32) -> Result<GrayImage>;
}

/// Edge detection seam
pub trait EdgeDetector {
    /// Detect edges with hysteresis thresholds `low` and `high`
    ///
    /// Returns a binary mask: 255 on edges, 0 elsewhere.
    fn detect_edges(&self, image: &GrayImage, low: f32, high: f32) -> Result<GrayImage>;
}

/// Keypoint detection and description seam
pub trait FeatureExtractor {
    /// Detect keypoints in `image` and compute one descriptor per keypoint
    fn detect_and_describe(&self, image: &GrayImage) -> Result<FeatureSet>;
}

/// Descriptor matching seam
pub trait FeatureMatcher {
    /// Pair descriptors of `query` with their nearest neighbors in `train`
    fn match_features(&self, query: &FeatureSet, train: &FeatureSet) -> Result<Vec<FeatureMatch>>;
}
