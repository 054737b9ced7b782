//! Length-prefixed message bit streams for bit-plane steganography.
//!
//! A hidden message is framed as:
//! - a 32-bit payload length, emitted least-significant bit first
//! - the payload bytes, each emitted most-significant bit first
//!
//! The frame has no storage of its own; it exists only as a bit pattern
//! laid over a raster's pixel samples.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    framed_bits, prefix_len, read_length_prefix_bits, write_length_prefix_bits, LengthPrefixBits,
    LENGTH_PREFIX_BITS, MAX_PAYLOAD_LEN,
};
pub use error::{FrameError, Result};
pub use reader::BitReader;
pub use writer::BitWriter;
