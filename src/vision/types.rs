use imageproc::binary_descriptors::brief::BriefDescriptor;

/// A detected interest point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyPoint {
    pub x: u32,
    pub y: u32,
    /// Detector response; higher is stronger
    pub score: f32,
}

/// Keypoints of one image together with their binary descriptors
///
/// Descriptors stay opaque to callers; only the backend that produced them
/// knows how to match them.
pub struct FeatureSet {
    keypoints: Vec<KeyPoint>,
    descriptors: Vec<BriefDescriptor>,
}

impl FeatureSet {
    pub(crate) fn new(keypoints: Vec<KeyPoint>, descriptors: Vec<BriefDescriptor>) -> Self {
        Self {
            keypoints,
            descriptors,
        }
    }

    pub fn keypoints(&self) -> &[KeyPoint] {
        &self.keypoints
    }

    pub(crate) fn descriptors(&self) -> &[BriefDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

/// One accepted correspondence between two feature sets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureMatch {
    /// Pixel position in the query image
    pub from: (u32, u32),
    /// Pixel position in the train image
    pub to: (u32, u32),
    /// Hamming distance between the matched descriptors
    pub distance: u32,
}
