//! Pixel input and channel addressing.
//!
//! This module owns the normalized form of a decoded image: an RGB raster
//! with 8-bit components, addressable per channel. File decoding lives at
//! this boundary too, so everything downstream is pure computation over
//! in-memory pixel data.

mod channel;
mod loader;
mod matrix;

pub use channel::{Channel, ChannelParseError};
pub use loader::{check_image, load_raster, LoadError};
pub use matrix::{ChannelMatrix, RasterError, RgbRaster};
