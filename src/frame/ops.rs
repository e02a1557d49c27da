use image::{imageops, GrayImage};

use crate::{
    error::{CompositorError, Result},
    frame::types::Frame,
};

/// Mirror the frame around its vertical axis
pub fn flip_horizontal(frame: &Frame) -> Frame {
    Frame::new(imageops::flip_horizontal(frame.as_image()))
}

/// Mirror the frame around its horizontal axis
pub fn flip_vertical(frame: &Frame) -> Frame {
    Frame::new(imageops::flip_vertical(frame.as_image()))
}

/// Mirror the frame around both axes (a 180-degree rotation)
pub fn flip_both(frame: &Frame) -> Frame {
    Frame::new(imageops::rotate180(frame.as_image()))
}

/// Convert the frame to 8-bit grayscale
pub fn to_grayscale(frame: &Frame) -> GrayImage {
    imageops::grayscale(frame.as_image())
}

/// Add `beta` to every channel of every pixel, saturating at the channel bounds
pub fn brighten(frame: &Frame, beta: i32) -> Frame {
    let mut out = Frame::new_black(frame.width(), frame.height());

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let src = frame.get_pixel(x, y);
            let dst = out.get_pixel_mut(x, y);
            for channel in 0..3 {
                dst[channel] = (i32::from(src[channel]) + beta).clamp(0, 255) as u8;
            }
        }
    }

    out
}

/// Blend two equally sized frames: `alpha * a + (1 - alpha) * b`, rounded
pub fn blend(a: &Frame, b: &Frame, alpha: f32) -> Result<Frame> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(CompositorError::generic(format!(
            "cannot blend {}x{} with {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }

    let beta = 1.0 - alpha;
    let mut out = Frame::new_black(a.width(), a.height());

    for y in 0..a.height() {
        for x in 0..a.width() {
            let pa = a.get_pixel(x, y);
            let pb = b.get_pixel(x, y);
            let dst = out.get_pixel_mut(x, y);
            for channel in 0..3 {
                let mixed = alpha * f32::from(pa[channel]) + beta * f32::from(pb[channel]);
                dst[channel] = mixed.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(out)
}
