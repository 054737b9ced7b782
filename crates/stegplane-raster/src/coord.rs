use std::fmt;

/// One addressable bit of a raster: pixel, color layer and bit position.
///
/// Layer `0` is blue on three-layer rasters, and the only layer on
/// single-layer rasters. Bit position `0` is the least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitCoordinate {
    pub x: u32,
    pub y: u32,
    pub layer: u8,
    pub bit_position: u8,
}

impl BitCoordinate {
    /// Create a new coordinate.
    pub fn new(x: u32, y: u32, layer: u8, bit_position: u8) -> Self {
        Self {
            x,
            y,
            layer,
            bit_position,
        }
    }

    /// The least significant bit of layer 0 at `(x, y)`.
    pub fn lsb(x: u32, y: u32) -> Self {
        Self::new(x, y, 0, 0)
    }
}

impl fmt::Display for BitCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) layer {} bit {}",
            self.x, self.y, self.layer, self.bit_position
        )
    }
}
