use serde::{Deserialize, Serialize};
use stegplane_raster::format::MAX_BIT_POSITION;
use stegplane_raster::PixelFormat;

use crate::error::{CodecError, Result};

/// The writable bit window `[start, end]` within each layer byte.
///
/// Bit `0` is the least significant bit. Always satisfies
/// `start <= end <= 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBitRange", into = "RawBitRange")]
pub struct BitRange {
    start: u8,
    end: u8,
}

impl BitRange {
    /// Only the least significant bit.
    pub const LSB: BitRange = BitRange { start: 0, end: 0 };

    /// Create a validated bit range.
    pub fn new(start: u8, end: u8) -> Result<Self> {
        if start > MAX_BIT_POSITION {
            return Err(CodecError::StartBitOutOfRange(start));
        }
        if end > MAX_BIT_POSITION {
            return Err(CodecError::EndBitOutOfRange(end));
        }
        if start > end {
            return Err(CodecError::BitRangeReversed { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(self) -> u8 {
        self.start
    }

    pub fn end(self) -> u8 {
        self.end
    }

    /// Number of writable bits per layer.
    pub fn bits_per_layer(self) -> u8 {
        self.end - self.start + 1
    }

    /// Check that the window fits the bit ceiling of `format`.
    pub fn check_format(self, format: PixelFormat) -> Result<()> {
        let max = format.max_bit_position();
        if self.end > max {
            return Err(CodecError::BitRangeExceedsFormat {
                end: self.end,
                max,
                format,
            });
        }
        Ok(())
    }
}

impl Default for BitRange {
    fn default() -> Self {
        Self::LSB
    }
}

#[derive(Serialize, Deserialize)]
struct RawBitRange {
    start: u8,
    end: u8,
}

impl TryFrom<RawBitRange> for BitRange {
    type Error = CodecError;

    fn try_from(raw: RawBitRange) -> Result<Self> {
        BitRange::new(raw.start, raw.end)
    }
}

impl From<BitRange> for RawBitRange {
    fn from(range: BitRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Controls how payload bits are laid over a raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Writable bit window within each layer. Default: least significant bit only.
    #[serde(default)]
    pub bit_range: BitRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_is_lsb_only() {
        let range = BitRange::default();
        assert_eq!((range.start(), range.end()), (0, 0));
        assert_eq!(range.bits_per_layer(), 1);
    }

    #[test]
    fn full_byte_window() {
        let range = BitRange::new(0, 7).unwrap();
        assert_eq!(range.bits_per_layer(), 8);
    }

    #[test]
    fn rejects_out_of_range_bits() {
        assert!(matches!(
            BitRange::new(8, 8),
            Err(CodecError::StartBitOutOfRange(8))
        ));
        assert!(matches!(
            BitRange::new(0, 9),
            Err(CodecError::EndBitOutOfRange(9))
        ));
    }

    #[test]
    fn rejects_reversed_range() {
        let err = BitRange::new(3, 2).unwrap_err();
        assert!(matches!(
            err,
            CodecError::BitRangeReversed { start: 3, end: 2 }
        ));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn packed_formats_cap_end_bit() {
        let range = BitRange::new(2, 5).unwrap();
        assert!(range.check_format(PixelFormat::Rgb24).is_ok());
        let err = range.check_format(PixelFormat::Rgb565).unwrap_err();
        assert!(matches!(
            err,
            CodecError::BitRangeExceedsFormat { end: 5, max: 4, .. }
        ));
        assert!(BitRange::new(0, 4)
            .unwrap()
            .check_format(PixelFormat::Rgb555)
            .is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let config: CodecConfig =
            serde_json::from_str(r#"{"bit_range":{"start":1,"end":3}}"#).unwrap();
        assert_eq!(config.bit_range, BitRange::new(1, 3).unwrap());

        let err = serde_json::from_str::<CodecConfig>(r#"{"bit_range":{"start":4,"end":1}}"#);
        assert!(err.is_err());

        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn serializes_as_start_end() {
        let json = serde_json::to_string(&BitRange::new(2, 6).unwrap()).unwrap();
        assert_eq!(json, r#"{"start":2,"end":6}"#);
    }
}
