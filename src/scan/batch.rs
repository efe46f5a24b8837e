//! Parallel batch scanning.
//!
//! Each image's analysis is independent and side-effect-free, so the
//! batch is embarrassingly parallel: one worker task per image over a
//! bounded rayon pool, no shared mutable state. A failure while loading
//! or analyzing one image becomes a structured failure record; it never
//! aborts the rest of the run.

use super::files::{discover_images, validate_directory, ScanError};
use crate::analysis::{ImageAnalyzer, ImageResult};
use crate::config::FileConfig;
use crate::raster::{load_raster, LoadError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A failure scoped to a single image within a batch.
#[derive(Debug)]
pub struct ScanFailure {
    /// The file that failed.
    pub path: PathBuf,
    /// What went wrong while loading it.
    pub error: LoadError,
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Outcome of a batch scan: per-image results plus per-image failures.
///
/// Both collections preserve discovery order. A report with failures is a
/// partial result set, not an error.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Successfully analyzed images.
    pub results: Vec<ImageResult>,
    /// Images that could not be analyzed.
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Total files attempted.
    pub fn total(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Scans a directory of images and analyzes each one.
///
/// Fatal errors (bad directory, invalid configuration) abort the scan;
/// per-image errors are collected into [`ScanReport::failures`] and
/// logged. The worker pool size comes from `config.scan.threads`
/// (0 = one per CPU core).
pub fn scan_directory(directory: &Path, config: &FileConfig) -> Result<ScanReport, ScanError> {
    config.decoder.validate()?;
    config.scan.validate()?;

    let directory = validate_directory(directory)?;
    let files = discover_images(&directory, &config.scan);
    tracing::info!(
        directory = %directory.display(),
        count = files.len(),
        "discovered image files"
    );

    let analyzer = ImageAnalyzer::new(config.decoder.clone())?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.scan.threads)
        .build()
        .map_err(|e| ScanError::PoolBuild(e.to_string()))?;

    let outcomes: Vec<Result<ImageResult, ScanFailure>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| analyze_file(path, &analyzer, config))
            .collect()
    });

    let mut report = ScanReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(result) => report.results.push(result),
            Err(failure) => {
                tracing::warn!(path = %failure.path.display(), error = %failure.error, "skipping image");
                report.failures.push(failure);
            }
        }
    }

    tracing::info!(
        analyzed = report.results.len(),
        failed = report.failures.len(),
        "batch scan complete"
    );
    Ok(report)
}

/// Loads and analyzes one image, mapping any load error to a failure record.
fn analyze_file(
    path: &Path,
    analyzer: &ImageAnalyzer,
    config: &FileConfig,
) -> Result<ImageResult, ScanFailure> {
    let raster = load_raster(path, &config.scan).map_err(|error| ScanFailure {
        path: path.to_path_buf(),
        error,
    })?;

    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    Ok(analyzer.analyze_image(&raster, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    /// Writes a PNG whose blue-channel LSBs carry a length-prefixed
    /// message over an otherwise flat carrier.
    fn write_stego_png(dir: &Path, name: &str, payload: &[u8]) {
        let mut bits = Vec::new();
        let len = payload.len() as u32;
        for i in (0..32).rev() {
            bits.push(((len >> i) & 1) as u8);
        }
        for &byte in payload {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        bits.resize(16 * 16, 0);

        let img = ImageBuffer::from_fn(16, 16, |x, y| {
            let bit = bits[(y * 16 + x) as usize];
            Rgb([0x40, 0x40, 0x80 | bit])
        });
        img.save(dir.join(name)).unwrap();
    }

    fn write_clean_png(dir: &Path, name: &str) {
        let img = ImageBuffer::from_fn(16, 16, |_, _| Rgb([0u8, 0, 0]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_scan_finds_messages_and_order() {
        let dir = TempDir::new().unwrap();
        write_clean_png(dir.path(), "aa.png");
        write_stego_png(dir.path(), "bb.png", b"hidden text");

        let report = scan_directory(dir.path(), &FileConfig::default()).unwrap();
        assert_eq!(report.results.len(), 2);
        assert!(report.failures.is_empty());

        assert_eq!(report.results[0].file, "aa.png");
        assert!(!report.results[0].message_found);

        assert_eq!(report.results[1].file, "bb.png");
        assert!(report.results[1].message_found);
        assert_eq!(report.results[1].message, "hidden text");
    }

    #[test]
    fn test_corrupt_file_collected_not_fatal() {
        let dir = TempDir::new().unwrap();
        write_clean_png(dir.path(), "good.png");
        std::fs::write(dir.path().join("bad.png"), b"this is not a png").unwrap();

        let report = scan_directory(dir.path(), &FileConfig::default()).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad.png"));
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_empty_directory_empty_report() {
        let dir = TempDir::new().unwrap();
        let report = scan_directory(dir.path(), &FileConfig::default()).unwrap();
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        assert!(scan_directory(&missing, &FileConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = FileConfig::default();
        config.decoder.max_bytes = 0;
        assert!(matches!(
            scan_directory(dir.path(), &config),
            Err(ScanError::Config(_))
        ));
    }

    #[test]
    fn test_single_thread_pool() {
        let dir = TempDir::new().unwrap();
        write_clean_png(dir.path(), "one.png");

        let mut config = FileConfig::default();
        config.scan.threads = 1;
        let report = scan_directory(dir.path(), &config).unwrap();
        assert_eq!(report.results.len(), 1);
    }
}
