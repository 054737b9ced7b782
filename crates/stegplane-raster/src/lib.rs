//! Pixel grid model and bit-level sample access for bit-plane steganography.
//!
//! Provides the lowest layer of stegplane:
//! - [`PixelFormat`] and its [`LayerCount`] classification
//! - [`Raster`], a plain width × height grid of packed pixel samples
//! - single-bit read/write at a [`BitCoordinate`]
//! - [`BitPlane`] extraction for visual inspection
//!
//! Everything above this crate addresses pixels exclusively through
//! [`Raster::bit`] and [`Raster::set_bit`].

pub mod coord;
pub mod error;
pub mod format;
pub mod meta;
pub mod plane;
pub mod raster;

#[cfg(feature = "image")]
pub mod io;

pub use coord::BitCoordinate;
pub use error::{RasterError, Result};
pub use format::{BitDepth, LayerCount, PixelFormat};
pub use meta::{ImageMeta, StegoImage};
pub use plane::BitPlane;
pub use raster::Raster;

#[cfg(feature = "image")]
pub use io::{read_raster, write_bit_plane, write_raster};
