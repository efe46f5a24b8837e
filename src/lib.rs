//! Stegdet — LSB Steganography Detection Library
//!
//! Analyzes raster images for evidence of hidden data embedded in the
//! least-significant bits of pixel color channels. Provides both a
//! message decoder for length-prefixed LSB payloads and per-bit-plane
//! statistical scoring (Shannon entropy, chi-square) for images where
//! no message is recoverable.
//!
//! # Architecture
//!
//! The pipeline follows an explicit data flow:
//!
//! ```text
//! raster → extraction → analysis → aggregation
//!                           ↓           ↓
//!                        decoder     report (CSV/JSON)
//! ```
//!
//! # Design Principles
//!
//! - **Heuristic, not proof**: entropy and chi-square scores flag anomalies;
//!   they do not establish that an image carries hidden data
//! - **Rejection is a value**: every way a decode attempt can fail short of
//!   a message is an explicit outcome, never an error
//! - **Per-image failure isolation**: one corrupt file never aborts a batch
//!
//! # Example
//!
//! ```no_run
//! use stegdet::{
//!     analysis::{ChannelAnalyzer, ImageAnalyzer},
//!     config::DecoderConfig,
//!     raster::{Channel, RgbRaster},
//! };
//!
//! // A 2x2 image, three bytes per pixel (RGB row-major)
//! let raster = RgbRaster::new(vec![0u8; 12], 2, 2).unwrap();
//!
//! // Score one channel and look for an embedded message
//! let analyzer = ChannelAnalyzer::new(DecoderConfig::default()).unwrap();
//! let result = analyzer.analyze(&raster.channel(Channel::Blue), Channel::Blue);
//!
//! for stats in &result.plane_stats {
//!     println!("plane {}: entropy {:.4}, chi2 {:.2}", stats.plane, stats.entropy, stats.chi2);
//! }
//!
//! // Or analyze all three channels into one per-image record
//! let analyzer = ImageAnalyzer::new(DecoderConfig::default()).unwrap();
//! let record = analyzer.analyze_image(&raster, "example.png");
//! println!("message found: {}", record.message_found);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod extraction;
pub mod raster;
pub mod report;
pub mod scan;

// Re-export commonly used types at crate root
pub use analysis::{
    ChannelAnalyzer, ChannelResult, DecodeOutcome, ImageAnalyzer, ImageResult, MessageDecoder,
    PlaneStats, RejectReason,
};
pub use config::{ConfigError, DecoderConfig, FileConfig, ScanConfig};
pub use extraction::{extract_plane, plane_view, BitSequence, Plane, PlaneError};
pub use raster::{Channel, ChannelMatrix, RgbRaster};
pub use scan::{ScanFailure, ScanReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
