//! Whole-image aggregation.
//!
//! Reduces the three per-channel analyses of one image into a single flat
//! record. The record's field names are the column contract of the batch
//! reports; downstream exporters serialize it verbatim.

use super::channel::{ChannelAnalyzer, ChannelResult};
use crate::config::{ConfigError, DecoderConfig};
use crate::raster::{Channel, RgbRaster};
use serde::Serialize;

/// Summary record for one scanned image.
///
/// Constructed once per image and immutable afterwards. `message` is the
/// empty string when no channel yielded a message.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResult {
    /// File name the raster was loaded from.
    pub file: String,
    /// True if any channel yielded a plausible message.
    pub message_found: bool,
    /// The decoded message, or empty if none.
    pub message: String,
    /// First channel (in red, green, blue order) that yielded a message.
    pub channel_with_message: Option<Channel>,
    /// Mean entropy across the red channel's 8 planes.
    pub red_entropy_avg: f64,
    /// Maximum chi-square across the red channel's 8 planes.
    pub red_chi2_max: f64,
    /// Mean entropy across the green channel's 8 planes.
    pub green_entropy_avg: f64,
    /// Maximum chi-square across the green channel's 8 planes.
    pub green_chi2_max: f64,
    /// Mean entropy across the blue channel's 8 planes.
    pub blue_entropy_avg: f64,
    /// Maximum chi-square across the blue channel's 8 planes.
    pub blue_chi2_max: f64,
    /// Mean of the three per-channel entropy averages.
    pub entropy_avg: f64,
    /// Maximum of the three per-channel chi-square maxima.
    pub chi2_max: f64,
}

impl ImageResult {
    /// Merges per-channel results into the flat per-image record.
    ///
    /// `channels` must be in reporting order (red, green, blue). The first
    /// entry with a decoded message wins; later messages never overwrite it.
    pub fn from_channels(file: &str, channels: &[ChannelResult; 3]) -> Self {
        debug_assert!(channels
            .iter()
            .zip(Channel::ALL)
            .all(|(r, c)| r.channel == c));

        let mut message = String::new();
        let mut channel_with_message = None;
        for result in channels {
            if let Some(msg) = &result.message {
                if channel_with_message.is_none() {
                    message = msg.clone();
                    channel_with_message = Some(result.channel);
                }
            }
        }

        let [red, green, blue] = channels;
        let entropy_avg =
            (red.entropy_avg() + green.entropy_avg() + blue.entropy_avg()) / 3.0;
        let chi2_max = red.chi2_max().max(green.chi2_max()).max(blue.chi2_max());

        Self {
            file: file.to_string(),
            message_found: channel_with_message.is_some(),
            message,
            channel_with_message,
            red_entropy_avg: red.entropy_avg(),
            red_chi2_max: red.chi2_max(),
            green_entropy_avg: green.entropy_avg(),
            green_chi2_max: green.chi2_max(),
            blue_entropy_avg: blue.entropy_avg(),
            blue_chi2_max: blue.chi2_max(),
            entropy_avg,
            chi2_max,
        }
    }
}

/// Analyzer for a whole image across all three channels.
///
/// This is the boundary the batch scanner calls once per discovered image.
pub struct ImageAnalyzer {
    analyzer: ChannelAnalyzer,
}

impl ImageAnalyzer {
    /// Creates an image analyzer, validating the configuration eagerly.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            analyzer: ChannelAnalyzer::new(config)?,
        })
    }

    /// Analyzes every channel of an image and merges the results.
    pub fn analyze_image(&self, raster: &RgbRaster, file: &str) -> ImageResult {
        let results = Channel::ALL.map(|channel| {
            let matrix = raster.channel(channel);
            self.analyzer.analyze(&matrix, channel)
        });

        let record = ImageResult::from_channels(file, &results);
        tracing::debug!(
            file,
            message_found = record.message_found,
            entropy_avg = record.entropy_avg,
            chi2_max = record.chi2_max,
            "image analyzed"
        );
        record
    }
}
