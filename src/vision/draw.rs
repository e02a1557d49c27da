use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::{
    frame::types::Frame,
    vision::types::{FeatureMatch, KeyPoint},
};

const KEYPOINT_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const MATCH_COLOR: Rgb<u8> = Rgb([255, 200, 0]);
const KEYPOINT_RADIUS: i32 = 3;

/// Render each keypoint as a hollow circle on a copy of `frame`
pub fn draw_keypoints(frame: &Frame, keypoints: &[KeyPoint]) -> Frame {
    let mut canvas = frame.as_image().clone();
    for keypoint in keypoints {
        draw_hollow_circle_mut(
            &mut canvas,
            (keypoint.x as i32, keypoint.y as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }
    Frame::new(canvas)
}

/// Place `left` and `right` side by side and draw one line per match
///
/// Match endpoints on the right image are shifted by the left image's width
/// so the lines cross the seam.
pub fn draw_matches(left: &Frame, right: &Frame, matches: &[FeatureMatch]) -> Frame {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());

    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, left.as_image(), 0, 0);
    imageops::replace(&mut canvas, right.as_image(), i64::from(left.width()), 0);

    let shift = left.width() as f32;
    for m in matches {
        let start = (m.from.0 as f32, m.from.1 as f32);
        let end = (m.to.0 as f32 + shift, m.to.1 as f32);
        draw_line_segment_mut(&mut canvas, start, end, MATCH_COLOR);
        draw_hollow_circle_mut(
            &mut canvas,
            (m.from.0 as i32, m.from.1 as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
        draw_hollow_circle_mut(
            &mut canvas,
            ((m.to.0 + left.width()) as i32, m.to.1 as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }

    Frame::new(canvas)
}
