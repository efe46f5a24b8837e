//! Batch directory scanning.
//!
//! Discovers eligible image files in a directory, analyzes each one on a
//! worker pool, and collects results and per-image failures into a single
//! report. Partial results are the normal outcome when some files are
//! unreadable; only setup errors abort a scan.

mod batch;
mod files;

pub use batch::{scan_directory, ScanFailure, ScanReport};
pub use files::{discover_images, validate_directory, ScanError};
