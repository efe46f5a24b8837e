//! Decoded pixel storage.

use super::Channel;
use thiserror::Error;

/// Errors raised when constructing pixel containers.
#[derive(Debug, Clone, Error)]
pub enum RasterError {
    #[error("pixel buffer length {actual} does not match {width}x{height} dimensions (expected {expected})")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A decoded RGB raster with 8-bit components.
///
/// Pixels are stored row-major, three bytes per pixel in red, green, blue
/// order. The raster is the input boundary of the analysis pipeline; the
/// pipeline borrows it read-only and produces independent result records.
#[derive(Clone)]
pub struct RgbRaster {
    /// Interleaved RGB component data, `width * height * 3` bytes.
    pixels: Vec<u8>,
    /// Raster width in pixels.
    width: u32,
    /// Raster height in pixels.
    height: u32,
}

impl RgbRaster {
    /// Creates a raster from interleaved RGB data.
    ///
    /// The buffer length must be exactly `width * height * 3`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, RasterError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Returns the raster width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the raster height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Extracts one color component as a standalone channel matrix.
    pub fn channel(&self, channel: Channel) -> ChannelMatrix {
        let offset = channel.index();
        let values = self
            .pixels
            .chunks_exact(3)
            .map(|px| px[offset])
            .collect();

        // Length is pixel_count by construction, so this cannot fail
        ChannelMatrix {
            values,
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for RgbRaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbRaster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

/// A single color component of a raster.
///
/// One byte per pixel in row-major order, values in [0, 255].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMatrix {
    values: Vec<u8>,
    width: u32,
    height: u32,
}

impl ChannelMatrix {
    /// Creates a channel matrix from raw component values.
    ///
    /// The buffer length must be exactly `width * height`.
    pub fn new(values: Vec<u8>, width: u32, height: u32) -> Result<Self, RasterError> {
        let expected = (width as usize) * (height as usize);
        if values.len() != expected {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Returns the component values in row-major order.
    #[inline]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Returns the matrix width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the matrix height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the matrix has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
