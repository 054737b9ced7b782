use serde::Serialize;
use stegplane_frame::{framed_bits, prefix_len, write_length_prefix_bits, BitReader};
use stegplane_raster::{Raster, RasterError};
use tracing::{debug, info};

use crate::capacity::Capacity;
use crate::config::{BitRange, CodecConfig};
use crate::error::{CodecError, Result};
use crate::sequencer::{Sequencer, Shots};

/// Summary of one successful embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeReport {
    pub payload_bytes: u32,
    pub bits_written: u64,
    pub bit_range: BitRange,
    pub capacity: Capacity,
    pub max_payload_bytes: u64,
}

/// Embeds length-prefixed payloads into rasters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    pub fn new(bit_range: BitRange) -> Self {
        Self::with_config(CodecConfig { bit_range })
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Validate the raster against this configuration and return its capacity.
    pub fn capacity(&self, raster: &Raster) -> Result<Capacity> {
        check_raster(raster, self.config.bit_range)?;
        Ok(Capacity::of(raster, self.config.bit_range))
    }

    /// Embed `payload` into a copy of `cover` and return the stego raster.
    pub fn encode(&self, cover: &Raster, payload: &[u8]) -> Result<Raster> {
        let mut stego = cover.clone();
        self.embed(&mut stego, payload)?;
        Ok(stego)
    }

    /// Embed `payload` into `raster` in place.
    ///
    /// Every check runs before the first bit is written, so a failed call
    /// leaves the raster untouched.
    pub fn embed(&self, raster: &mut Raster, payload: &[u8]) -> Result<EncodeReport> {
        let range = self.config.bit_range;
        let capacity = self.capacity(raster)?;
        let len = prefix_len(payload.len())?;

        debug!(
            payload_bytes = len,
            capacity_bits = capacity.bits,
            start_bit = range.start(),
            end_bit = range.end(),
            "encoding payload"
        );

        if !capacity.fits(len) {
            return Err(CodecError::MessageTooLarge {
                size: u64::from(len),
                max: capacity.max_payload_bytes(),
            });
        }

        let sequencer = Sequencer::new(capacity, range);
        let mut shots = sequencer.shots();

        for bit in write_length_prefix_bits(len) {
            write_next(raster, &mut shots, bit)?;
        }

        let mut message = BitReader::new(payload);
        while !message.is_finished() {
            let bit = message.next_bit()?;
            write_next(raster, &mut shots, bit)?;
        }

        info!(payload_bytes = len, "finished LSB encoding");

        Ok(EncodeReport {
            payload_bytes: len,
            bits_written: framed_bits(len),
            bit_range: range,
            capacity,
            max_payload_bytes: capacity.max_payload_bytes(),
        })
    }
}

/// Embed `payload` into a copy of `cover` using the bit window `range`.
pub fn encode(cover: &Raster, payload: &[u8], range: BitRange) -> Result<Raster> {
    Encoder::new(range).encode(cover, payload)
}

/// Reject rasters the codec cannot address under `range`.
pub(crate) fn check_raster(raster: &Raster, range: BitRange) -> Result<()> {
    if !raster.layer_count().is_supported() {
        return Err(RasterError::UnsupportedFormat(raster.format()).into());
    }
    range.check_format(raster.format())
}

fn write_next(raster: &mut Raster, shots: &mut Shots, bit: bool) -> Result<()> {
    let index = shots.next_index();
    let shot = shots.next().ok_or(CodecError::ShotsExhausted {
        index,
        capacity: shots.capacity(),
    })?;
    raster.set_bit(shot, bit)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use stegplane_raster::{BitCoordinate, BitDepth, PixelFormat};

    use super::*;
    use crate::error::ErrorKind;

    fn cover(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, PixelFormat::Rgb24, |x, y| {
            (x * 37 + y * 101) * 0x0001_0203 & 0x00FF_FFFF
        })
    }

    #[test]
    fn one_byte_fits_four_by_four() {
        let report = Encoder::default()
            .embed(&mut cover(4, 4), b"A")
            .unwrap();
        assert_eq!(report.payload_bytes, 1);
        assert_eq!(report.bits_written, 40);
        assert_eq!(report.capacity.bits, 48);
    }

    #[test]
    fn two_bytes_fill_four_by_four_exactly() {
        let report = Encoder::default()
            .embed(&mut cover(4, 4), b"AB")
            .unwrap();
        assert_eq!(report.bits_written, 48);
    }

    #[test]
    fn three_bytes_overflow_four_by_four() {
        let original = cover(4, 4);
        let mut raster = original.clone();
        let err = Encoder::default().embed(&mut raster, b"ABC").unwrap_err();
        assert!(matches!(err, CodecError::MessageTooLarge { size: 3, max: 2 }));
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(raster, original);
    }

    #[test]
    fn prefix_lands_in_first_32_shots() {
        let mut raster = Raster::new(16, 16, PixelFormat::Gray8);
        Encoder::default().embed(&mut raster, &[0u8; 5]).unwrap();

        // length 5 = 0b101, least significant bit first over rows 0 and 1
        assert!(raster.bit(BitCoordinate::lsb(0, 0)).unwrap());
        assert!(!raster.bit(BitCoordinate::lsb(1, 0)).unwrap());
        assert!(raster.bit(BitCoordinate::lsb(2, 0)).unwrap());
        for x in 3..16 {
            assert!(!raster.bit(BitCoordinate::lsb(x, 0)).unwrap());
            assert!(!raster.bit(BitCoordinate::lsb(x, 1)).unwrap());
        }
    }

    #[test]
    fn payload_bits_follow_prefix_most_significant_first() {
        let mut raster = Raster::new(8, 8, PixelFormat::Gray8);
        Encoder::default().embed(&mut raster, &[0b1000_0001]).unwrap();

        // shots 32..40 are pixels (0..8, 4)
        let bits: Vec<bool> = (0..8)
            .map(|x| raster.bit(BitCoordinate::lsb(x, 4)).unwrap())
            .collect();
        assert_eq!(
            bits,
            vec![true, false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn encode_returns_fresh_raster() {
        let original = cover(6, 6);
        let stego = encode(&original, b"hi", BitRange::LSB).unwrap();
        assert_ne!(stego, original);
        assert_eq!(original, cover(6, 6));
    }

    #[test]
    fn only_window_bits_change() {
        let range = BitRange::new(2, 3).unwrap();
        let original = cover(6, 6);
        let stego = encode(&original, b"window", range).unwrap();
        for (before, after) in original.samples().iter().zip(stego.samples()) {
            let changed = before ^ after;
            assert_eq!(changed & !0x000C_0C0C, 0);
        }
    }

    #[test]
    fn unsupported_format_is_rejected_before_writing() {
        let mut raster = Raster::new(32, 32, PixelFormat::Binary(BitDepth::Four));
        let err = Encoder::default().embed(&mut raster, b"x").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Raster(RasterError::UnsupportedFormat(_))
        ));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn packed_format_bit_ceiling_enforced_up_front() {
        let mut raster = Raster::new(32, 32, PixelFormat::Rgb555);
        let range = BitRange::new(3, 6).unwrap();
        let err = Encoder::new(range).embed(&mut raster, b"x").unwrap_err();
        assert!(matches!(err, CodecError::BitRangeExceedsFormat { .. }));
        assert!(raster.samples().iter().all(|s| *s == 0));
    }

    #[test]
    fn empty_payload_writes_only_prefix() {
        let mut raster = Raster::from_fn(4, 4, PixelFormat::Rgb24, |_, _| 0x00FF_FFFF);
        let report = Encoder::default().embed(&mut raster, b"").unwrap();
        assert_eq!(report.bits_written, 32);
        // 32 zero bits clear the blue/green/red LSBs of the first 10 pixels and blue/green of the 11th
        assert_eq!(raster.sample(0, 0).unwrap(), 0x00FE_FEFE);
        assert_eq!(raster.sample(2, 2).unwrap(), 0x00FF_FEFE);
        assert_eq!(raster.sample(3, 2).unwrap(), 0x00FF_FFFF);
    }
}
