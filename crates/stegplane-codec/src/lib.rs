//! Bit-plane sequencing, embedding and extraction of length-prefixed payloads.
//!
//! This is the core of stegplane. A payload is hidden by walking the raster
//! in row-major order, visiting every layer and every bit of the configured
//! [`BitRange`] of a pixel before moving to the next pixel, and writing one
//! message bit per visited position.

pub mod capacity;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod sequencer;

pub use capacity::Capacity;
pub use config::{BitRange, CodecConfig};
pub use decoder::{decode, DecodeReport, Decoder, PrefixReport};
pub use encoder::{encode, EncodeReport, Encoder};
pub use error::{CodecError, ErrorKind, Result};
pub use sequencer::{next_shot, Sequencer, Shots};
