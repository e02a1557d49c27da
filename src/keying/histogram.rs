use std::fmt;

use crate::{
    error::{ConfigError, KeyingError, Result},
    frame::types::Frame,
};

/// The most common color of a frame, derived from the winning histogram bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DominantColor {
    /// Channel values in RGB order
    pub rgb: [u8; 3],
}

impl DominantColor {
    pub fn red(&self) -> u8 {
        self.rgb[0]
    }

    pub fn green(&self) -> u8 {
        self.rgb[1]
    }

    pub fn blue(&self) -> u8 {
        self.rgb[2]
    }
}

impl fmt::Display for DominantColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.rgb[0], self.rgb[1], self.rgb[2]
        )
    }
}

/// A coarse 3D color histogram over the blue, green, and red channels
///
/// Each channel's 0-255 range is divided into `bucket_count` equal buckets of
/// width `256 / bucket_count`. When the division leaves a remainder the top
/// bucket absorbs it, so every channel value maps to a valid bucket.
pub struct ColorHistogram {
    bucket_count: usize,
    bucket_size: usize,
    counts: Vec<u32>,
}

impl ColorHistogram {
    /// Build the histogram by assigning every pixel of `frame` to a bucket
    pub fn from_frame(frame: &Frame, bucket_count: u32) -> Result<Self> {
        if bucket_count == 0 || bucket_count > 256 {
            return Err(ConfigError::InvalidValue {
                key: "keying.bucket_count".to_string(),
                value: bucket_count.to_string(),
            }
            .into());
        }
        if frame.is_empty() {
            return Err(KeyingError::EmptyForeground.into());
        }

        let bucket_count = bucket_count as usize;
        let bucket_size = 256 / bucket_count;
        let mut counts = vec![0u32; bucket_count * bucket_count * bucket_count];

        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let [red, green, blue] = frame.get_pixel(x, y);
                let b = (blue as usize / bucket_size).min(bucket_count - 1);
                let g = (green as usize / bucket_size).min(bucket_count - 1);
                let r = (red as usize / bucket_size).min(bucket_count - 1);
                counts[(b * bucket_count + g) * bucket_count + r] += 1;
            }
        }

        Ok(Self {
            bucket_count,
            bucket_size,
            counts,
        })
    }

    /// Number of buckets per channel
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Width of one bucket in channel units
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Vote count of a single bucket
    pub fn count(&self, bucket_blue: usize, bucket_green: usize, bucket_red: usize) -> u32 {
        self.counts[(bucket_blue * self.bucket_count + bucket_green) * self.bucket_count
            + bucket_red]
    }

    /// Total number of votes; equals the pixel count of the source frame
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// The center color of the bucket with the most votes
    ///
    /// Buckets are scanned in increasing (blue, green, red) index order and a
    /// later bucket only wins with a strictly greater count, so ties keep the
    /// lexicographically smallest bucket.
    pub fn dominant(&self) -> DominantColor {
        let n = self.bucket_count;
        let mut max = 0u32;
        let mut winner = (0usize, 0usize, 0usize);

        for b in 0..n {
            for g in 0..n {
                for r in 0..n {
                    let count = self.count(b, g, r);
                    if count > max {
                        max = count;
                        winner = (b, g, r);
                    }
                }
            }
        }

        let center = |bucket: usize| (bucket * self.bucket_size + self.bucket_size / 2) as u8;
        let (b, g, r) = winner;
        DominantColor {
            rgb: [center(r), center(g), center(b)],
        }
    }
}

/// Estimate the dominant color of `frame` using a `bucket_count`-wide
/// histogram per channel
///
/// Returns the winning bucket's center color together with the bucket width,
/// which callers use to scale the keying threshold.
pub fn estimate_dominant_color(frame: &Frame, bucket_count: u32) -> Result<(DominantColor, u32)> {
    let histogram = ColorHistogram::from_frame(frame, bucket_count)?;
    Ok((histogram.dominant(), histogram.bucket_size() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositorError;

    #[test]
    fn test_uniform_frame_votes_for_its_bucket() {
        // Every pixel is rgb(10, 70, 130): buckets (r, g, b) = (0, 1, 2) at width 64
        let frame = Frame::new_filled(8, 8, [10, 70, 130]);
        let (color, bucket_size) = estimate_dominant_color(&frame, 4).unwrap();

        assert_eq!(bucket_size, 64);
        assert_eq!(color.rgb, [32, 96, 160]);
    }

    #[test]
    fn test_histogram_total_equals_pixel_count() {
        let mut frame = Frame::new_filled(5, 7, [200, 10, 10]);
        frame.set_pixel(0, 0, [1, 2, 3]);
        frame.set_pixel(4, 6, [255, 255, 255]);

        let histogram = ColorHistogram::from_frame(&frame, 4).unwrap();
        assert_eq!(histogram.total(), 35);
    }

    #[test]
    fn test_majority_bucket_wins() {
        let mut frame = Frame::new_filled(3, 3, [10, 10, 10]);
        frame.set_pixel(0, 0, [250, 250, 250]);
        frame.set_pixel(1, 0, [250, 250, 250]);

        let (color, _) = estimate_dominant_color(&frame, 4).unwrap();
        assert_eq!(color.rgb, [32, 32, 32]);
    }

    #[test]
    fn test_tie_prefers_smaller_bgr_bucket() {
        // Two pixels, two distinct buckets with one vote each.
        // rgb(200, 10, 10) lands in bucket (b, g, r) = (0, 0, 3);
        // rgb(10, 10, 200) lands in bucket (b, g, r) = (3, 0, 0).
        // (0, 0, 3) is lexicographically smaller in (blue, green, red) order.
        let mut frame = Frame::new_black(2, 1);
        frame.set_pixel(0, 0, [10, 10, 200]);
        frame.set_pixel(1, 0, [200, 10, 10]);

        let (color, _) = estimate_dominant_color(&frame, 4).unwrap();
        assert_eq!(color.rgb, [224, 32, 32]);
    }

    #[test]
    fn test_dominant_channels_are_bucket_centers() {
        // bucket_count = 1 collapses everything into one bucket centered at 128
        let frame = Frame::new_filled(2, 2, [3, 250, 77]);
        let (color, bucket_size) = estimate_dominant_color(&frame, 1).unwrap();

        assert_eq!(bucket_size, 256);
        assert_eq!(color.rgb, [128, 128, 128]);
    }

    #[test]
    fn test_top_bucket_absorbs_floor_division_remainder() {
        // 256 / 5 = 51, so channel 255 would index bucket 5 of 5 without the clamp
        let frame = Frame::new_filled(2, 2, [255, 255, 255]);
        let (color, bucket_size) = estimate_dominant_color(&frame, 5).unwrap();

        assert_eq!(bucket_size, 51);
        assert_eq!(color.rgb, [229, 229, 229]);
    }

    #[test]
    fn test_dominant_bucket_has_max_votes() {
        use rand::{rngs::SmallRng, Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(9);
        let mut frame = Frame::new_black(32, 24);
        for y in 0..24 {
            for x in 0..32 {
                frame.set_pixel(x, y, [rng.gen(), rng.gen(), rng.gen()]);
            }
        }

        let histogram = ColorHistogram::from_frame(&frame, 4).unwrap();
        let dominant = histogram.dominant();

        // The winning bucket holds at least as many votes as any other
        let winner = (
            dominant.blue() as usize / 64,
            dominant.green() as usize / 64,
            dominant.red() as usize / 64,
        );
        let max = histogram.count(winner.0, winner.1, winner.2);
        for b in 0..4 {
            for g in 0..4 {
                for r in 0..4 {
                    assert!(histogram.count(b, g, r) <= max);
                }
            }
        }

        // Every channel of the representative color is a bucket center
        for channel in dominant.rgb {
            assert_eq!(channel as usize % 64, 32);
        }
    }

    #[test]
    fn test_invalid_bucket_count_is_config_error() {
        let frame = Frame::new_filled(1, 1, [0, 0, 0]);
        for bad in [0u32, 257] {
            let err = estimate_dominant_color(&frame, bad).unwrap_err();
            assert!(matches!(err, CompositorError::Config(_)));
        }
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let frame = Frame::new_black(0, 0);
        let err = estimate_dominant_color(&frame, 4).unwrap_err();
        assert!(matches!(err, CompositorError::Keying(_)));
    }
}
