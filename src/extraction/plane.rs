//! Bit-plane extraction.
//!
//! A bit plane is the set of bits at one fixed position (0 = LSB through
//! 7 = MSB) across all pixels of a channel. Plane 0 is where naive LSB
//! embedding lives; the higher planes provide the statistical baseline.

use super::BitSequence;
use crate::raster::ChannelMatrix;
use image::GrayImage;
use thiserror::Error;

/// Number of bit planes in an 8-bit channel.
pub const PLANE_COUNT: usize = 8;

/// Errors raised for invalid plane indices.
#[derive(Debug, Clone, Copy, Error)]
pub enum PlaneError {
    #[error("bit plane {0} out of range (expected 0-7)")]
    OutOfRange(u8),
}

/// A validated bit-plane index, 0 (LSB) through 7 (MSB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Plane(u8);

impl Plane {
    /// The least significant bit plane.
    pub const LSB: Plane = Plane(0);

    /// All planes in ascending order, LSB first.
    pub const ALL: [Plane; PLANE_COUNT] = [
        Plane(0),
        Plane(1),
        Plane(2),
        Plane(3),
        Plane(4),
        Plane(5),
        Plane(6),
        Plane(7),
    ];

    /// Creates a plane index, rejecting values above 7.
    pub fn new(index: u8) -> Result<Self, PlaneError> {
        if index as usize >= PLANE_COUNT {
            return Err(PlaneError::OutOfRange(index));
        }
        Ok(Plane(index))
    }

    /// Returns the raw plane index.
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts one bit plane of a channel as a flat bit sequence.
///
/// Entry `i` is `(value_i >> plane) & 1` for pixel `i` in row-major order.
/// An empty matrix yields an empty sequence; callers handle zero length
/// explicitly.
pub fn extract_plane(matrix: &ChannelMatrix, plane: Plane) -> BitSequence {
    let shift = plane.index();
    BitSequence::from_bits(matrix.values().iter().map(|&v| (v >> shift) & 1).collect())
}

/// Renders one bit plane as a black-and-white image.
///
/// Set bits map to 255, clear bits to 0, preserving the matrix
/// dimensions. Saving the returned image is up to the caller.
pub fn plane_view(matrix: &ChannelMatrix, plane: Plane) -> GrayImage {
    let shift = plane.index();
    let data: Vec<u8> = matrix
        .values()
        .iter()
        .map(|&v| ((v >> shift) & 1) * 255)
        .collect();

    // Buffer length equals width * height by ChannelMatrix construction
    GrayImage::from_raw(matrix.width(), matrix.height(), data)
        .unwrap_or_else(|| GrayImage::new(matrix.width(), matrix.height()))
}
