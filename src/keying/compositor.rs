use crate::{
    error::{KeyingError, Result},
    frame::types::Frame,
    keying::histogram::DominantColor,
};

/// Immutable compositing parameters: foreground, background, and key color
///
/// The threshold is deliberately not part of the state; it is the only input
/// that varies between recomputations, so it is passed per call and every
/// call derives a fresh composite from the same captured inputs.
pub struct Keyer {
    foreground: Frame,
    background: Frame,
    key: DominantColor,
}

impl Keyer {
    /// Capture the compositing inputs
    ///
    /// Both images must hold at least one pixel; the background is sampled
    /// modulo its dimensions, so an empty background has no valid sample.
    pub fn new(foreground: Frame, background: Frame, key: DominantColor) -> Result<Self> {
        if foreground.is_empty() {
            return Err(KeyingError::EmptyForeground.into());
        }
        if background.is_empty() {
            return Err(KeyingError::EmptyBackground.into());
        }

        Ok(Self {
            foreground,
            background,
            key,
        })
    }

    pub fn foreground(&self) -> &Frame {
        &self.foreground
    }

    pub fn background(&self) -> &Frame {
        &self.background
    }

    pub fn key(&self) -> DominantColor {
        self.key
    }

    /// Replace every foreground pixel near the key color with the
    /// corresponding background pixel
    ///
    /// A pixel is replaced when all three channel distances to the key color
    /// are strictly below `threshold`; a threshold of 0 therefore matches
    /// nothing and a threshold above 255 matches everything. The background
    /// tiles periodically when it is smaller than the foreground. The
    /// foreground itself is never modified; each call clones it and returns a
    /// fresh composite.
    pub fn composite(&self, threshold: u32) -> Frame {
        let mut out = self.foreground.clone();
        let bg_width = self.background.width();
        let bg_height = self.background.height();

        for y in 0..out.height() {
            for x in 0..out.width() {
                let [red, green, blue] = self.foreground.get_pixel(x, y);

                let diff_blue = u32::from(blue.abs_diff(self.key.blue()));
                let diff_green = u32::from(green.abs_diff(self.key.green()));
                let diff_red = u32::from(red.abs_diff(self.key.red()));

                if diff_blue < threshold && diff_green < threshold && diff_red < threshold {
                    let replacement = self.background.get_pixel(x % bg_width, y % bg_height);
                    out.set_pixel(x, y, replacement);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_background(width: u32, height: u32) -> Frame {
        let mut frame = Frame::new_black(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y * width) % 251) as u8;
                frame.set_pixel(x, y, [v, v.wrapping_add(40), v.wrapping_add(90)]);
            }
        }
        frame
    }

    fn key(rgb: [u8; 3]) -> DominantColor {
        DominantColor { rgb }
    }

    #[test]
    fn test_zero_threshold_leaves_foreground_untouched() {
        // No pixel equals the key color, and the comparison is strict,
        // so nothing is replaced
        let foreground = Frame::new_filled(6, 4, [50, 60, 70]);
        let keyer = Keyer::new(
            foreground.clone(),
            checker_background(3, 3),
            key([50, 60, 71]),
        )
        .unwrap();

        assert_eq!(keyer.composite(0), foreground);
    }

    #[test]
    fn test_zero_threshold_excludes_exact_match_too() {
        let foreground = Frame::new_filled(2, 2, [50, 60, 70]);
        let keyer = Keyer::new(
            foreground.clone(),
            checker_background(2, 2),
            key([50, 60, 70]),
        )
        .unwrap();

        assert_eq!(keyer.composite(0), foreground);
    }

    #[test]
    fn test_large_threshold_tiles_background_everywhere() {
        let background = checker_background(3, 3);
        let keyer = Keyer::new(
            Frame::new_filled(10, 10, [0, 0, 0]),
            background.clone(),
            key([255, 255, 255]),
        )
        .unwrap();

        let out = keyer.composite(256);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(out.get_pixel(x, y), background.get_pixel(x % 3, y % 3));
            }
        }

        // Row 7, column 8 comes from background row 1, column 2
        assert_eq!(out.get_pixel(8, 7), background.get_pixel(2, 1));
    }

    #[test]
    fn test_all_channels_must_be_near() {
        let mut foreground = Frame::new_filled(3, 1, [100, 100, 100]);
        // Two channels near the key, one far
        foreground.set_pixel(1, 0, [100, 100, 200]);
        let background = Frame::new_filled(1, 1, [1, 2, 3]);

        let keyer = Keyer::new(foreground, background, key([100, 100, 100])).unwrap();
        let out = keyer.composite(10);

        assert_eq!(out.get_pixel(0, 0), [1, 2, 3]);
        assert_eq!(out.get_pixel(1, 0), [100, 100, 200]);
        assert_eq!(out.get_pixel(2, 0), [1, 2, 3]);
    }

    #[test]
    fn test_green_distance_uses_green_channel() {
        // Key green sits far from the pixel's green but near its other
        // channels; the pixel must survive
        let foreground = Frame::new_filled(1, 1, [100, 30, 100]);
        let background = Frame::new_filled(1, 1, [0, 0, 0]);

        let keyer = Keyer::new(foreground.clone(), background, key([100, 120, 100])).unwrap();
        assert_eq!(keyer.composite(20), foreground);
    }

    #[test]
    fn test_composite_is_deterministic() {
        let mut foreground = checker_background(9, 5);
        foreground.set_pixel(4, 2, [32, 32, 32]);
        let keyer = Keyer::new(foreground, checker_background(4, 4), key([32, 32, 32])).unwrap();

        let first = keyer.composite(17);
        let second = keyer.composite(17);
        assert_eq!(first.to_rgb_bytes(), second.to_rgb_bytes());
    }

    #[test]
    fn test_foreground_is_not_mutated() {
        let foreground = Frame::new_filled(4, 4, [32, 32, 32]);
        let keyer = Keyer::new(
            foreground.clone(),
            checker_background(2, 2),
            key([32, 32, 32]),
        )
        .unwrap();

        let _ = keyer.composite(300);
        assert_eq!(keyer.foreground(), &foreground);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let ok = Frame::new_filled(1, 1, [0, 0, 0]);
        let empty = Frame::new_black(0, 0);

        assert!(Keyer::new(empty.clone(), ok.clone(), key([0, 0, 0])).is_err());
        assert!(Keyer::new(ok, empty, key([0, 0, 0])).is_err());
    }
}
