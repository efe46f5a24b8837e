//! Per-channel analysis.

use super::decoder::MessageDecoder;
use super::statistics::PlaneStats;
use crate::config::{ConfigError, DecoderConfig};
use crate::extraction::{extract_plane, Plane, PLANE_COUNT};
use crate::raster::{Channel, ChannelMatrix};

/// Result of analyzing one channel of one image.
#[derive(Debug, Clone)]
pub struct ChannelResult {
    /// The channel that was analyzed.
    pub channel: Channel,
    /// Decoded message, if the LSB sequence passed every gate.
    pub message: Option<String>,
    /// Statistics for all 8 bit planes, LSB first.
    pub plane_stats: [PlaneStats; PLANE_COUNT],
}

impl ChannelResult {
    /// Mean entropy across the 8 bit planes.
    pub fn entropy_avg(&self) -> f64 {
        let sum: f64 = self.plane_stats.iter().map(|s| s.entropy).sum();
        sum / PLANE_COUNT as f64
    }

    /// Maximum chi-square score across the 8 bit planes.
    pub fn chi2_max(&self) -> f64 {
        self.plane_stats
            .iter()
            .map(|s| s.chi2)
            .fold(0.0, f64::max)
    }
}

/// Analyzer for a single (image, channel) pair.
///
/// Composes bit-plane extraction, the statistics estimators, and the
/// message decoder. Stateless between calls; only the immutable decoder
/// configuration is retained.
pub struct ChannelAnalyzer {
    decoder: MessageDecoder,
}

impl ChannelAnalyzer {
    /// Creates an analyzer, validating the decoder configuration eagerly.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            decoder: MessageDecoder::new(config)?,
        })
    }

    /// Analyzes one channel: decode attempt plus statistics for all planes.
    ///
    /// The LSB plane is extracted once and feeds both the decoder and
    /// plane 0's statistics, so the two views agree bit-for-bit.
    pub fn analyze(&self, matrix: &ChannelMatrix, channel: Channel) -> ChannelResult {
        let lsb = extract_plane(matrix, Plane::LSB);
        let message = self.decoder.decode(&lsb).into_message();

        let plane_stats = std::array::from_fn(|i| {
            let plane = Plane::ALL[i];
            if plane == Plane::LSB {
                PlaneStats::measure(plane, &lsb)
            } else {
                PlaneStats::measure(plane, &extract_plane(matrix, plane))
            }
        });

        if message.is_some() {
            tracing::debug!(%channel, "decoded plausible LSB message");
        }

        ChannelResult {
            channel,
            message,
            plane_stats,
        }
    }
}
