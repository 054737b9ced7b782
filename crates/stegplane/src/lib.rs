//! Bit-plane LSB steganography for raster images.
//!
//! stegplane hides an arbitrary byte payload inside the low-order bits of an
//! image's color layers and recovers it again. The payload is preceded by a
//! 32-bit length prefix and laid out pixel by pixel over a configurable bit
//! window.
//!
//! # Crate Structure
//!
//! - [`raster`]: pixel grid model and single-bit access (image file I/O behind the `image` feature)
//! - [`frame`]: message bit streams and the 32-bit length prefix
//! - [`codec`]: bit sequencing, capacity, encoder and decoder
//!
//! ```
//! use stegplane::codec::{decode, encode, BitRange};
//! use stegplane::raster::{PixelFormat, Raster};
//!
//! let cover = Raster::new(16, 16, PixelFormat::Rgb24);
//! let stego = encode(&cover, b"hello", BitRange::LSB)?;
//! assert_eq!(decode(&stego, BitRange::LSB)?.as_ref(), b"hello");
//! # Ok::<(), stegplane::codec::CodecError>(())
//! ```

/// Re-export raster types.
pub mod raster {
    pub use stegplane_raster::*;
}

/// Re-export frame types.
pub mod frame {
    pub use stegplane_frame::*;
}

/// Re-export codec types.
pub mod codec {
    pub use stegplane_codec::*;
}
