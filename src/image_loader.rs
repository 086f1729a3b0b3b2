// Image loading module
// Decodes candidate files and fits them into the target box

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use image::imageops::FilterType;
use image::DynamicImage;
use log::{debug, warn};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Decoded and scaled image ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Pixel data in BGRA order (4 bytes per pixel)
    pub bgra_data: Vec<u8>,
}

/// Compute the displayed size of a `width`x`height` image in the target box.
///
/// The long axis is set to the target dimension. The other axis is scaled by
/// `target / actual` when the image is larger than the target on the long
/// axis, and by `actual / target` otherwise.
pub fn fit_dimensions(width: u32, height: u32, target_width: u32, target_height: u32) -> (u32, u32) {
    let (w, h) = (width as f64, height as f64);

    if width >= height {
        let tw = target_width as f64;
        let sf = if tw < w { tw / w } else { w / tw };
        (target_width, ((h * sf) as u32).max(1))
    } else {
        let th = target_height as f64;
        let sf = if th < h { th / h } else { h / th };
        (((w * sf) as u32).max(1), target_height)
    }
}

/// Load the image at `path` and fit it to the configured target box
pub fn load_and_fit(path: &Path, config: &ViewerConfig) -> Result<LoadedImage> {
    let decode_err = |source: image::ImageError| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let data = fs::read(path).map_err(|e| decode_err(e.into()))?;
    let img = load_from_bytes(&data).map_err(decode_err)?;

    let (width, height) = fit_dimensions(
        img.width(),
        img.height(),
        config.target_width,
        config.target_height,
    );
    debug!(
        "Fit {}: {}x{} -> {}x{}",
        path.display(),
        img.width(),
        img.height(),
        width,
        height
    );

    let img = img.resize_exact(width, height, FilterType::Lanczos3);
    Ok(to_loaded(&img))
}

/// Load a candidate file, reporting failures and turning them into `None`
pub fn try_load(path: &Path, config: &ViewerConfig) -> Option<LoadedImage> {
    match load_and_fit(path, config) {
        Ok(image) => Some(image),
        Err(err) => {
            report_failure(&err);
            None
        }
    }
}

/// Print a decode failure: the underlying cause first, then the user line
fn report_failure(err: &ViewerError) {
    if let Some(source) = std::error::Error::source(err) {
        warn!("{}", source);
    }
    for line in failure_lines(err) {
        eprintln!("{}", line);
    }
}

/// Console lines describing a failed candidate
fn failure_lines(err: &ViewerError) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(source) = std::error::Error::source(err) {
        lines.push(source.to_string());
    }
    lines.push(format!("Error: {}", err));
    lines
}

/// Convert to BGRA (Wayland expects ARGB8888, i.e. BGRA in little-endian)
fn to_loaded(img: &DynamicImage) -> LoadedImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut bgra_data = rgba.into_raw();
    for pixel in bgra_data.chunks_exact_mut(4) {
        pixel.swap(0, 2); // Swap R and B
    }

    LoadedImage {
        width,
        height,
        bgra_data,
    }
}

/// Load an image from raw bytes, auto-detecting the format
fn load_from_bytes(data: &[u8]) -> image::ImageResult<DynamicImage> {
    let format = image::guess_format(data)?;
    image::load(Cursor::new(data), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_fit_large_wide_image() {
        assert_eq!(fit_dimensions(1280, 960, 640, 480), (640, 480));
        assert_eq!(fit_dimensions(1600, 900, 640, 480), (640, 360));
    }

    #[test]
    fn test_fit_small_wide_image_keeps_target_width() {
        // 320 <= 640, so the factor is 320/640 and only the height shrinks
        assert_eq!(fit_dimensions(320, 240, 640, 480), (640, 120));
        assert_eq!(fit_dimensions(640, 480, 640, 480), (640, 480));
    }

    #[test]
    fn test_fit_tall_images() {
        assert_eq!(fit_dimensions(960, 1920, 640, 480), (240, 480));
        assert_eq!(fit_dimensions(120, 240, 640, 480), (60, 480));
    }

    #[test]
    fn test_fit_square_uses_width_branch() {
        assert_eq!(fit_dimensions(800, 800, 640, 480), (640, 640));
    }

    #[test]
    fn test_fit_never_zero() {
        assert_eq!(fit_dimensions(4000, 1, 640, 480), (640, 1));
        assert_eq!(fit_dimensions(1, 4000, 640, 480), (1, 480));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let first = fit_dimensions(1234, 567, 640, 480);
        for _ in 0..3 {
            assert_eq!(fit_dimensions(1234, 567, 640, 480), first);
        }
    }

    #[test]
    fn test_load_and_fit_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbaImage::from_pixel(1280, 960, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let image = load_and_fit(&path, &ViewerConfig::default()).unwrap();
        assert_eq!((image.width, image.height), (640, 480));
        assert_eq!(image.bgra_data.len(), 640 * 480 * 4);
        // Red ends up in the third byte after the swap
        assert_eq!(&image.bgra_data[..2], &[0, 0]);
        assert!(image.bgra_data[2] > 250);
    }

    #[test]
    fn test_format_detected_from_content() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("source.png");
        RgbaImage::from_pixel(10, 5, Rgba([0, 0, 0, 255]))
            .save(&png)
            .unwrap();
        let renamed = dir.path().join("picture.dat");
        fs::rename(&png, &renamed).unwrap();

        assert!(load_and_fit(&renamed, &ViewerConfig::default()).is_ok());
    }

    #[test]
    fn test_text_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.txt");
        fs::write(&path, b"hello").unwrap();

        let err = load_and_fit(&path, &ViewerConfig::default()).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));
        assert_eq!(
            err.to_string(),
            format!(
                "could not load {}. It may not be a valid image file.",
                path.display()
            )
        );
        assert!(try_load(&path, &ViewerConfig::default()).is_none());
    }

    #[test]
    fn test_failure_lines_show_cause_then_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.txt");
        fs::write(&path, b"hello").unwrap();

        let err = load_and_fit(&path, &ViewerConfig::default()).unwrap_err();
        let cause = std::error::Error::source(&err).unwrap().to_string();
        let lines = failure_lines(&err);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], cause);
        assert_eq!(
            lines[1],
            format!(
                "Error: could not load {}. It may not be a valid image file.",
                path.display()
            )
        );
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let err = load_and_fit(&dir.path().join("gone.png"), &ViewerConfig::default()).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));
    }
}
