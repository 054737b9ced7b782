//! Pixel formats and their layer classification.
//!
//! A raster's [`LayerCount`] is derived solely from its [`PixelFormat`] and
//! never from pixel content.

use std::fmt;

/// Highest writable bit position for byte-wide channels.
pub const MAX_BIT_POSITION: u8 = 7;

/// Highest writable bit position for packed 15/16-bit RGB channels.
pub const MAX_PACKED_BIT_POSITION: u8 = 4;

/// Storage layout of a single pixel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1, 2 or 4-bit packed gray levels or palette indices.
    Binary(BitDepth),
    /// 8-bit palette indices.
    Indexed8,
    /// 8-bit grayscale.
    Gray8,
    /// 16-bit grayscale. Only the low byte of each sample is addressable.
    Gray16,
    /// 24-bit RGB, packed as `0x00RRGGBB`.
    Rgb24,
    /// 32-bit RGB with alpha, packed as `0xAARRGGBB`.
    Argb32,
    /// 15-bit RGB; each 5-bit channel is stored in its own byte lane.
    Rgb555,
    /// 16-bit RGB; 5/6/5-bit channels stored in their own byte lanes.
    Rgb565,
}

impl PixelFormat {
    /// Number of addressable layers for this format.
    pub fn layer_count(self) -> LayerCount {
        match self {
            PixelFormat::Binary(_) => LayerCount::Unsupported,
            PixelFormat::Indexed8 | PixelFormat::Gray8 | PixelFormat::Gray16 => {
                LayerCount::Single
            }
            _ => LayerCount::Triple,
        }
    }

    /// Highest bit position that may be read or written within one layer.
    pub fn max_bit_position(self) -> u8 {
        match self {
            PixelFormat::Rgb555 | PixelFormat::Rgb565 => MAX_PACKED_BIT_POSITION,
            _ => MAX_BIT_POSITION,
        }
    }

    /// Returns true if samples carry an alpha channel in bits 24..32.
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb32)
    }

    /// Short lowercase name for diagnostics and reports.
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Binary(BitDepth::One) => "binary1",
            PixelFormat::Binary(BitDepth::Two) => "binary2",
            PixelFormat::Binary(BitDepth::Four) => "binary4",
            PixelFormat::Indexed8 => "indexed8",
            PixelFormat::Gray8 => "gray8",
            PixelFormat::Gray16 => "gray16",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Argb32 => "argb32",
            PixelFormat::Rgb555 => "rgb555",
            PixelFormat::Rgb565 => "rgb565",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sample depth of a low-depth [`PixelFormat::Binary`] raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    One = 1,
    Two = 2,
    Four = 4,
}

impl BitDepth {
    /// The depth for `bits`, if it is 1, 2 or 4.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(BitDepth::One),
            2 => Some(BitDepth::Two),
            4 => Some(BitDepth::Four),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Largest sample value representable at this depth.
    pub fn max_value(self) -> u8 {
        (1u8 << self.bits()) - 1
    }
}

/// Number of color layers a pixel format exposes for embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerCount {
    /// No addressable layers; every bit access fails.
    Unsupported = 0,
    /// One 8-bit layer (gray or palette index).
    Single = 1,
    /// Blue, green and red as layers 0, 1 and 2.
    Triple = 3,
}

impl LayerCount {
    /// The layer count as a number.
    pub fn get(self) -> u8 {
        self as u8
    }

    /// Returns true if at least one layer is addressable.
    pub fn is_supported(self) -> bool {
        self != LayerCount::Unsupported
    }

    /// Human-readable name of a layer within this layer model.
    pub fn layer_name(self, layer: u8) -> &'static str {
        match (self, layer) {
            (LayerCount::Single, 0) => "gray",
            (LayerCount::Triple, 0) => "blue",
            (LayerCount::Triple, 1) => "green",
            (LayerCount::Triple, 2) => "red",
            _ => "none",
        }
    }
}

impl fmt::Display for LayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_depth_indexed_is_unsupported() {
        for depth in [BitDepth::One, BitDepth::Two, BitDepth::Four] {
            assert_eq!(
                PixelFormat::Binary(depth).layer_count(),
                LayerCount::Unsupported
            );
        }
    }

    #[test]
    fn bit_depth_accepts_only_low_depths() {
        assert_eq!(BitDepth::from_bits(1), Some(BitDepth::One));
        assert_eq!(BitDepth::from_bits(4), Some(BitDepth::Four));
        for bits in [0, 3, 8, 255] {
            assert_eq!(BitDepth::from_bits(bits), None);
        }
        assert_eq!(BitDepth::Four.max_value(), 15);
        assert_eq!(PixelFormat::Binary(BitDepth::Two).name(), "binary2");
        assert_eq!(PixelFormat::Binary(BitDepth::Four).name(), "binary4");
    }

    #[test]
    fn eight_bit_formats_are_single_layer() {
        assert_eq!(PixelFormat::Gray8.layer_count(), LayerCount::Single);
        assert_eq!(PixelFormat::Indexed8.layer_count(), LayerCount::Single);
        assert_eq!(PixelFormat::Gray16.layer_count(), LayerCount::Single);
    }

    #[test]
    fn color_formats_are_three_layer() {
        for format in [
            PixelFormat::Rgb24,
            PixelFormat::Argb32,
            PixelFormat::Rgb555,
            PixelFormat::Rgb565,
        ] {
            assert_eq!(format.layer_count(), LayerCount::Triple);
            assert_eq!(format.layer_count().get(), 3);
        }
    }

    #[test]
    fn packed_formats_have_lower_bit_ceiling() {
        assert_eq!(PixelFormat::Rgb555.max_bit_position(), 4);
        assert_eq!(PixelFormat::Rgb565.max_bit_position(), 4);
        assert_eq!(PixelFormat::Rgb24.max_bit_position(), 7);
        assert_eq!(PixelFormat::Gray8.max_bit_position(), 7);
    }

    #[test]
    fn layer_names() {
        assert_eq!(LayerCount::Triple.layer_name(0), "blue");
        assert_eq!(LayerCount::Triple.layer_name(2), "red");
        assert_eq!(LayerCount::Single.layer_name(0), "gray");
        assert_eq!(LayerCount::Single.layer_name(1), "none");
    }
}
