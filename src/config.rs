//! Runtime configuration.
//!
//! The decoding heuristics are tunable with documented defaults rather
//! than fixed constants. All parameters are validated eagerly; invalid
//! values are programmer or operator errors, never silently clamped.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the LSB message decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Largest plausible payload size in bytes. Header lengths above this
    /// are treated as noise and rejected.
    pub max_bytes: usize,
    /// Minimum fraction of printable ASCII characters (code points 32-126)
    /// required for a decoded payload to count as a message.
    pub printable_ratio: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024,
            printable_ratio: 0.8,
        }
    }
}

impl DecoderConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::InvalidMaxBytes);
        }
        if !(self.printable_ratio > 0.0 && self.printable_ratio <= 1.0) {
            return Err(ConfigError::InvalidPrintableRatio);
        }
        Ok(())
    }
}

/// Configuration for batch directory scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions eligible for analysis (lossless formats only;
    /// lossy compression destroys LSB payloads).
    pub allowed_extensions: Vec<String>,
    /// Largest image accepted, in megapixels. Checked from the file header
    /// before decoding.
    pub max_megapixels: f64,
    /// Worker threads for batch scanning. 0 means one per CPU core.
    pub threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".png".into(), ".bmp".into()],
            max_megapixels: 20.0,
            threads: 0,
        }
    }
}

impl ScanConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if !(self.max_megapixels > 0.0) {
            return Err(ConfigError::InvalidSizeLimit);
        }
        Ok(())
    }

    /// Returns true if the extension (with leading dot) is allowed.
    ///
    /// Comparison is case-insensitive.
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("max_bytes must be positive")]
    InvalidMaxBytes,
    #[error("printable_ratio must be in (0, 1]")]
    InvalidPrintableRatio,
    #[error("allowed_extensions must not be empty")]
    NoExtensions,
    #[error("max_megapixels must be positive")]
    InvalidSizeLimit,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Message-decoding heuristics.
    #[serde(default)]
    pub decoder: DecoderConfig,
    /// Batch-scanning limits.
    #[serde(default)]
    pub scan: ScanConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file and validates it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.decoder.validate()?;
        config.scan.validate()?;
        Ok(config)
    }
}
