use image::GrayImage;
use imageproc::{
    binary_descriptors::{brief::brief, match_binary_descriptors, BinaryDescriptor},
    corners::corners_fast9,
    edges::canny,
    filter::gaussian_blur_f32,
    point::Point,
};
use tracing::debug;

use crate::{
    config::FeatureConfig,
    error::{Result, VisionError},
    vision::{
        traits::{EdgeDetector, FeatureExtractor, FeatureMatcher, Smoother},
        types::{FeatureMatch, FeatureSet, KeyPoint},
    },
};

/// Descriptor sampling stays inside the image when keypoints keep this
/// distance from every border
const BORDER_MARGIN: u32 = 20;

/// Sigma used to stabilize the patch before descriptor sampling
const DESCRIPTOR_SMOOTHING_SIGMA: f32 = 2.0;

/// Seed for the locality-sensitive hashing pass inside descriptor matching;
/// fixed so repeated runs pair the same descriptors
const LSH_SEED: u64 = 0xc0de;

/// `imageproc`-backed implementation of all vision seams
pub struct ImageprocVision {
    features: FeatureConfig,
}

impl ImageprocVision {
    pub fn new() -> Self {
        Self {
            features: FeatureConfig::default(),
        }
    }

    /// Use the given detection/matching tunables instead of the defaults
    pub fn with_features(features: FeatureConfig) -> Self {
        Self { features }
    }
}

impl Default for ImageprocVision {
    fn default() -> Self {
        Self::new()
    }
}

impl Smoother for ImageprocVision {
    fn blur(&self, image: &GrayImage, sigma: f32) -> Result<GrayImage> {
        if sigma <= 0.0 {
            return Err(VisionError::InvalidSigma { sigma }.into());
        }

        Ok(gaussian_blur_f32(image, sigma))
    }
}

impl EdgeDetector for ImageprocVision {
    fn detect_edges(&self, image: &GrayImage, low: f32, high: f32) -> Result<GrayImage> {
        if low < 0.0 || low >= high {
            return Err(VisionError::InvalidEdgeThresholds { low, high }.into());
        }

        Ok(canny(image, low, high))
    }
}

impl FeatureExtractor for ImageprocVision {
    fn detect_and_describe(&self, image: &GrayImage) -> Result<FeatureSet> {
        let (width, height) = image.dimensions();

        let mut corners = corners_fast9(image, self.features.fast_threshold);
        corners.sort_by(|a, b| b.score.total_cmp(&a.score));
        corners.truncate(self.features.max_keypoints);

        // Keep only corners whose descriptor patch fits inside the image
        let keypoints: Vec<KeyPoint> = corners
            .into_iter()
            .filter(|c| {
                c.x >= BORDER_MARGIN
                    && c.y >= BORDER_MARGIN
                    && c.x + BORDER_MARGIN < width
                    && c.y + BORDER_MARGIN < height
            })
            .map(|c| KeyPoint {
                x: c.x,
                y: c.y,
                score: c.score,
            })
            .collect();

        debug!("Detected {} usable corners", keypoints.len());
        if keypoints.is_empty() {
            return Ok(FeatureSet::new(Vec::new(), Vec::new()));
        }

        let smoothed = gaussian_blur_f32(image, DESCRIPTOR_SMOOTHING_SIGMA);
        let points: Vec<Point<u32>> = keypoints.iter().map(|k| Point::new(k.x, k.y)).collect();
        let (descriptors, _test_pairs) = brief(
            &smoothed,
            &points,
            self.features.descriptor_bits,
            None,
        )
        .map_err(|e| VisionError::DescriptorFailed {
            reason: e.to_string(),
        })?;

        Ok(FeatureSet::new(keypoints, descriptors))
    }
}

impl FeatureMatcher for ImageprocVision {
    fn match_features(&self, query: &FeatureSet, train: &FeatureSet) -> Result<Vec<FeatureMatch>> {
        if query.is_empty() || train.is_empty() {
            return Ok(Vec::new());
        }

        let pairs = match_binary_descriptors(
            query.descriptors(),
            train.descriptors(),
            self.features.match_threshold,
            Some(LSH_SEED),
        );

        let matches = pairs
            .into_iter()
            .map(|(q, t)| {
                let from = q.position();
                let to = t.position();
                FeatureMatch {
                    from: (from.x, from.y),
                    to: (to.x, to.y),
                    distance: q.hamming_distance(t),
                }
            })
            .collect();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Black canvas with a bright axis-aligned square, giving FAST four
    /// strong corners well away from the borders
    fn square_image() -> GrayImage {
        let mut image = GrayImage::new(100, 100);
        for y in 30..70 {
            for x in 30..70 {
                image.put_pixel(x, y, Luma([255]));
            }
        }
        image
    }

    #[test]
    fn test_blur_preserves_dimensions() {
        let vision = ImageprocVision::new();
        let blurred = vision.blur(&square_image(), 2.0).unwrap();
        assert_eq!(blurred.dimensions(), (100, 100));
    }

    #[test]
    fn test_blur_rejects_zero_sigma() {
        let vision = ImageprocVision::new();
        assert!(vision.blur(&square_image(), 0.0).is_err());
        assert!(vision.blur(&square_image(), -1.5).is_err());
    }

    #[test]
    fn test_edges_are_binary() {
        let vision = ImageprocVision::new();
        let edges = vision.detect_edges(&square_image(), 20.0, 60.0).unwrap();

        assert_eq!(edges.dimensions(), (100, 100));
        assert!(edges.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert!(edges.pixels().any(|p| p[0] == 255));
    }

    #[test]
    fn test_edges_reject_inverted_thresholds() {
        let vision = ImageprocVision::new();
        assert!(vision.detect_edges(&square_image(), 60.0, 20.0).is_err());
    }

    #[test]
    fn test_detect_and_describe_pairs_up() {
        let vision = ImageprocVision::new();
        let features = vision.detect_and_describe(&square_image()).unwrap();

        assert!(!features.is_empty());
        assert_eq!(features.keypoints().len(), features.len());
        for keypoint in features.keypoints() {
            assert!(keypoint.x >= BORDER_MARGIN && keypoint.x < 100 - BORDER_MARGIN);
            assert!(keypoint.y >= BORDER_MARGIN && keypoint.y < 100 - BORDER_MARGIN);
        }
    }

    #[test]
    fn test_featureless_image_yields_empty_set() {
        let vision = ImageprocVision::new();
        let features = vision
            .detect_and_describe(&GrayImage::new(64, 64))
            .unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn test_self_match_finds_exact_pairs() {
        let vision = ImageprocVision::new();
        let image = square_image();

        let a = vision.detect_and_describe(&image).unwrap();
        let b = vision.detect_and_describe(&image).unwrap();
        let matches = vision.match_features(&a, &b).unwrap();

        assert!(!matches.is_empty());
        for m in &matches {
            assert!(m.distance <= FeatureConfig::default().match_threshold);
        }
    }

    #[test]
    fn test_matching_empty_sets_is_empty() {
        let vision = ImageprocVision::new();
        let empty = FeatureSet::new(Vec::new(), Vec::new());
        let features = vision.detect_and_describe(&square_image()).unwrap();

        assert!(vision.match_features(&empty, &features).unwrap().is_empty());
        assert!(vision.match_features(&features, &empty).unwrap().is_empty());
    }
}
