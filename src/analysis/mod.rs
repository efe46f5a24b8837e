//! Steganalysis over extracted bit sequences.
//!
//! This module holds the statistical estimators, the LSB message decoder,
//! and the composition layers that turn raw channel data into per-channel
//! and per-image results. Scores are heuristics for relative comparison,
//! not proofs of tampering.

mod aggregate;
mod channel;
mod decoder;
mod statistics;

pub use aggregate::{ImageAnalyzer, ImageResult};
pub use channel::{ChannelAnalyzer, ChannelResult};
pub use decoder::{DecodeOutcome, MessageDecoder, RejectReason};
pub use statistics::{chi_square, entropy, PlaneStats};
