//! Color channel selection.

use serde::{Deserialize, Serialize};

/// A color channel of an RGB raster.
///
/// The ordering red=0, green=1, blue=2 matches both the component layout
/// of the pixel buffer and the column naming of batch reports; it is part
/// of the reporting contract, not an implementation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red component (index 0).
    Red,
    /// Green component (index 1).
    Green,
    /// Blue component (index 2).
    Blue,
}

impl Channel {
    /// All channels in reporting order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Returns the component index within an RGB pixel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Returns the lowercase channel name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl Default for Channel {
    /// Blue is the conventional default for LSB analysis: blue-channel
    /// noise is the least perceptible, so it is the most common hiding spot.
    fn default() -> Self {
        Channel::Blue
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Channel {
    type Err = ChannelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Channel::Red),
            "green" => Ok(Channel::Green),
            "blue" => Ok(Channel::Blue),
            _ => Err(ChannelParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown channel name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown channel {0:?} (expected red, green, or blue)")]
pub struct ChannelParseError(String);
