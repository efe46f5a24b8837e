//! Bit-plane harvesting.
//!
//! This module converts channel matrices into flat bit sequences, one bit
//! per pixel, for a chosen plane. Extraction is pure and side-effect-free;
//! the same channel data always yields the same sequence.

mod bitstream;
mod plane;

pub use bitstream::BitSequence;
pub use plane::{extract_plane, plane_view, Plane, PlaneError, PLANE_COUNT};
