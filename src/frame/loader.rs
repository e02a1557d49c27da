use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::{
    error::{CompositorError, LoadError, Result},
    frame::types::Frame,
};

/// Load an RGB frame from disk
///
/// Fails before any processing step runs: a missing, undecodable, or empty
/// image is reported with the offending path rather than propagated as a
/// zero-sized buffer.
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let path = path.as_ref();
    let image = open_image(path)?;

    let frame = Frame::new(image.to_rgb8());
    if frame.is_empty() {
        return Err(LoadError::EmptyImage {
            path: path.display().to_string(),
        }
        .into());
    }

    debug!(
        "Loaded {:?} ({}x{})",
        path,
        frame.width(),
        frame.height()
    );
    Ok(frame)
}

/// Load an image from disk as 8-bit grayscale
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let path = path.as_ref();
    let image = open_image(path)?.to_luma8();

    if image.width() == 0 || image.height() == 0 {
        return Err(LoadError::EmptyImage {
            path: path.display().to_string(),
        }
        .into());
    }

    Ok(image)
}

fn open_image(path: &Path) -> Result<image::DynamicImage> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    image::open(path).map_err(|e| {
        LoadError::DecodeFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write an RGB frame to disk; the format follows the path extension
pub fn save_frame<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<()> {
    let path = path.as_ref();
    frame.as_image().save(path).map_err(|e| CompositorError::Save {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    debug!("Wrote {:?}", path);
    Ok(())
}

/// Write a grayscale image to disk; the format follows the path extension
pub fn save_gray<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|e| CompositorError::Save {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositorError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_names_path() {
        let err = load_frame("no_such_image.png").unwrap_err();
        match err {
            CompositorError::Load(LoadError::NotFound { path }) => {
                assert_eq!(path, "no_such_image.png");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_garbage_file_fails_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_frame(&path).unwrap_err();
        assert!(matches!(
            err,
            CompositorError::Load(LoadError::DecodeFailed { .. })
        ));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut frame = Frame::new_black(3, 2);
        frame.set_pixel(1, 1, [200, 100, 50]);

        save_frame(&frame, &path).unwrap();
        let loaded = load_frame(&path).unwrap();

        // PNG is lossless, so the buffers are bit-identical
        assert_eq!(loaded, frame);
    }

    #[test]
    fn test_load_gray_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");

        let frame = Frame::new_filled(4, 4, [128, 128, 128]);
        save_frame(&frame, &path).unwrap();

        let gray = load_gray(&path).unwrap();
        assert_eq!(gray.dimensions(), (4, 4));
    }
}
