use serde::Serialize;
use stegplane_frame::{framed_bits, LENGTH_PREFIX_BITS};
use stegplane_raster::{LayerCount, Raster};

use crate::config::BitRange;

/// Addressable bit capacity of a raster under one bit-range configuration.
///
/// `bits = width * height * layers * bits_per_layer`, and the length prefix
/// always occupies the first 32 of those bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub width: u32,
    pub height: u32,
    pub layers: u8,
    pub bits_per_layer: u8,
    pub bits: u64,
}

impl Capacity {
    pub fn new(width: u32, height: u32, layers: LayerCount, range: BitRange) -> Self {
        let bits = u64::from(width)
            .saturating_mul(u64::from(height))
            .saturating_mul(u64::from(layers.get()))
            .saturating_mul(u64::from(range.bits_per_layer()));
        Self {
            width,
            height,
            layers: layers.get(),
            bits_per_layer: range.bits_per_layer(),
            bits,
        }
    }

    pub fn of(raster: &Raster, range: BitRange) -> Self {
        Self::new(
            raster.width(),
            raster.height(),
            raster.layer_count(),
            range,
        )
    }

    /// Largest payload, in bytes, that fits alongside the length prefix.
    pub fn max_payload_bytes(&self) -> u64 {
        let bytes = self.bits.saturating_sub(LENGTH_PREFIX_BITS) / 8;
        bytes.min(u64::from(u32::MAX))
    }

    /// Returns true if a framed payload of `len` bytes fits.
    pub fn fits(&self, len: u32) -> bool {
        framed_bits(len) <= self.bits
    }
}
