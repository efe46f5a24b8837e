//! Image loading and validation boundary.
//!
//! The analysis pipeline operates on normalized RGB rasters; this module
//! is the only place that touches image files. Grayscale and palette
//! images are upconverted to RGB here so the core never sees them.

use super::RgbRaster;
use crate::config::ScanConfig;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading an image for analysis.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),
    #[error("not a regular file: {0}")]
    NotAFile(String),
    #[error("image is {megapixels:.1}MP, exceeds the {limit:.1}MP limit")]
    TooLarge { megapixels: f64, limit: f64 },
    #[error("failed to decode image: {0}")]
    DecodeFailed(String),
}

/// Checks that a file is eligible for analysis without decoding it.
///
/// Validates the extension against the configured allow-list and reads
/// the image dimensions from the header to enforce the megapixel cap.
pub fn check_image(path: &Path, config: &ScanConfig) -> Result<(), LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    if !config.allows_extension(&ext) {
        return Err(LoadError::UnsupportedExtension(ext));
    }

    if !path.is_file() {
        return Err(LoadError::NotAFile(path.display().to_string()));
    }

    // Header-only probe; oversized files are rejected before any decode
    let (width, height) =
        image::image_dimensions(path).map_err(|e| LoadError::DecodeFailed(e.to_string()))?;
    let megapixels = (width as f64) * (height as f64) / 1_000_000.0;
    if megapixels > config.max_megapixels {
        tracing::warn!(
            path = %path.display(),
            megapixels,
            limit = config.max_megapixels,
            "image exceeds size limit"
        );
        return Err(LoadError::TooLarge {
            megapixels,
            limit: config.max_megapixels,
        });
    }

    Ok(())
}

/// Loads an image file as a normalized RGB raster.
///
/// Applies the same validation as [`check_image`], then decodes and
/// converts to 8-bit RGB regardless of the stored color model.
pub fn load_raster(path: &Path, config: &ScanConfig) -> Result<RgbRaster, LoadError> {
    check_image(path, config)?;

    let decoded = image::open(path).map_err(|e| LoadError::DecodeFailed(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    tracing::debug!(path = %path.display(), width, height, "loaded image");

    RgbRaster::new(rgb.into_raw(), width, height)
        .map_err(|e| LoadError::DecodeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        });
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_png_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = write_test_png(dir.path(), "sample.png", 8, 6);

        let raster = load_raster(&path, &ScanConfig::default()).unwrap();
        assert_eq!(raster.width(), 8);
        assert_eq!(raster.height(), 6);
        assert_eq!(raster.pixel_count(), 48);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let result = load_raster(&path, &ScanConfig::default());
        assert!(matches!(result, Err(LoadError::UnsupportedExtension(_))));
    }

    #[test]
    fn test_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        let result = check_image(&path, &ScanConfig::default());
        assert!(matches!(result, Err(LoadError::NotAFile(_))));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let dir = TempDir::new().unwrap();
        let path = write_test_png(dir.path(), "big.png", 100, 100);

        let config = ScanConfig {
            max_megapixels: 0.001, // 1000 pixels
            ..Default::default()
        };
        let result = check_image(&path, &config);
        assert!(matches!(result, Err(LoadError::TooLarge { .. })));
    }

    #[test]
    fn test_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"\x89PNG but not really").unwrap();

        let result = load_raster(&path, &ScanConfig::default());
        assert!(matches!(result, Err(LoadError::DecodeFailed(_))));
    }

    #[test]
    fn test_grayscale_upconverted_to_rgb() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        let img = image::GrayImage::from_fn(4, 4, |x, y| image::Luma([((x + y) * 20) as u8]));
        img.save(&path).unwrap();

        let raster = load_raster(&path, &ScanConfig::default()).unwrap();
        assert_eq!(raster.pixel_count(), 16);
        // Gray pixels replicate into all three channels
        let r = raster.channel(crate::raster::Channel::Red);
        let b = raster.channel(crate::raster::Channel::Blue);
        assert_eq!(r.values(), b.values());
    }
}
