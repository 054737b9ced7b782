use bytes::Bytes;
use serde::Serialize;
use stegplane_frame::{framed_bits, read_length_prefix_bits, BitWriter, LENGTH_PREFIX_BITS};
use stegplane_raster::Raster;
use tracing::{debug, info, warn};

use crate::capacity::Capacity;
use crate::config::{BitRange, CodecConfig};
use crate::encoder::check_raster;
use crate::error::{CodecError, Result};
use crate::sequencer::{Sequencer, Shots};

/// Summary of one successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub payload_bytes: u32,
    pub bits_read: u64,
    pub bit_range: BitRange,
    pub capacity: Capacity,
}

/// The length prefix as found in a raster, before any sanity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrefixReport {
    pub length: u32,
    pub framed_bits: u64,
    pub capacity_bits: u64,
    /// True if a message of `length` bytes fits the raster.
    pub plausible: bool,
}

/// Extracts length-prefixed payloads from rasters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    pub fn new(bit_range: BitRange) -> Self {
        Self::with_config(CodecConfig { bit_range })
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Recover the hidden payload.
    pub fn decode(&self, raster: &Raster) -> Result<Bytes> {
        self.decode_with_report(raster).map(|(payload, _)| payload)
    }

    /// Recover the hidden payload along with a summary of the extraction.
    pub fn decode_with_report(&self, raster: &Raster) -> Result<(Bytes, DecodeReport)> {
        let range = self.config.bit_range;
        check_raster(raster, range)?;
        let capacity = Capacity::of(raster, range);
        let mut shots = Sequencer::new(capacity, range).shots();

        debug!(
            capacity_bits = capacity.bits,
            start_bit = range.start(),
            end_bit = range.end(),
            "decoding payload"
        );

        let len = read_prefix(raster, &mut shots)?;

        if framed_bits(len) > capacity.bits {
            warn!(size = len, capacity_bits = capacity.bits, "recovered size rejected");
            return Err(CodecError::RecoveredSizeInvalid { size: len });
        }

        info!(payload_bytes = len, "decoding, size of message recovered");

        let payload_bits = u64::from(len) * 8;
        if payload_bits >= capacity.bits {
            return Err(CodecError::MessageOverflow {
                bits: payload_bits,
                capacity: capacity.bits,
            });
        }

        let mut message = BitWriter::new(len as usize);
        while !message.is_finished() {
            let bit = read_next(raster, &mut shots)?;
            message.set_next(bit)?;
        }

        let report = DecodeReport {
            payload_bytes: len,
            bits_read: framed_bits(len),
            bit_range: range,
            capacity,
        };
        Ok((message.into_bytes(), report))
    }

    /// Read only the length prefix and judge whether it fits the raster.
    ///
    /// Unlike [`Decoder::decode`], an implausible length is reported rather
    /// than treated as an error.
    pub fn peek_length(&self, raster: &Raster) -> Result<PrefixReport> {
        let range = self.config.bit_range;
        check_raster(raster, range)?;
        let capacity = Capacity::of(raster, range);
        let mut shots = Sequencer::new(capacity, range).shots();

        let length = read_prefix(raster, &mut shots)?;
        Ok(PrefixReport {
            length,
            framed_bits: framed_bits(length),
            capacity_bits: capacity.bits,
            plausible: capacity.fits(length),
        })
    }
}

/// Recover the payload hidden in `raster` under the bit window `range`.
pub fn decode(raster: &Raster, range: BitRange) -> Result<Bytes> {
    Decoder::new(range).decode(raster)
}

fn read_prefix(raster: &Raster, shots: &mut Shots) -> Result<u32> {
    let mut bits = [false; LENGTH_PREFIX_BITS as usize];
    for slot in bits.iter_mut() {
        *slot = read_next(raster, shots)?;
    }
    Ok(read_length_prefix_bits(&bits))
}

fn read_next(raster: &Raster, shots: &mut Shots) -> Result<bool> {
    let index = shots.next_index();
    let shot = shots.next().ok_or(CodecError::ShotsExhausted {
        index,
        capacity: shots.capacity(),
    })?;
    Ok(raster.bit(shot)?)
}

#[cfg(test)]
mod tests {
    use stegplane_frame::write_length_prefix_bits;
    use stegplane_raster::{BitDepth, PixelFormat, RasterError};

    use super::*;
    use crate::encoder::{encode, Encoder};
    use crate::error::ErrorKind;

    fn cover(width: u32, height: u32, format: PixelFormat) -> Raster {
        Raster::from_fn(width, height, format, |x, y| {
            (x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503)) & 0x00FF_FFFF
        })
    }

    /// Write a raw length prefix without any capacity check.
    fn forge_prefix(raster: &mut Raster, range: BitRange, len: u32) {
        let seq = Sequencer::for_raster(raster, range);
        for (shot, bit) in seq.shots().zip(write_length_prefix_bits(len)) {
            raster.set_bit(shot, bit).unwrap();
        }
    }

    #[test]
    fn recovers_payload() {
        let stego = encode(&cover(16, 16, PixelFormat::Rgb24), b"hello", BitRange::LSB).unwrap();
        let payload = decode(&stego, BitRange::LSB).unwrap();
        assert_eq!(payload.as_ref(), b"hello");
    }

    #[test]
    fn boundary_payload_recovered() {
        let stego = encode(&cover(4, 4, PixelFormat::Rgb24), b"AB", BitRange::LSB).unwrap();
        let (payload, report) = Decoder::default().decode_with_report(&stego).unwrap();
        assert_eq!(payload.as_ref(), b"AB");
        assert_eq!(report.bits_read, 48);
        assert_eq!(report.capacity.bits, 48);
    }

    #[test]
    fn empty_payload_recovered() {
        let stego = encode(&cover(4, 4, PixelFormat::Rgb24), b"", BitRange::LSB).unwrap();
        assert!(decode(&stego, BitRange::LSB).unwrap().is_empty());
    }

    #[test]
    fn oversized_prefix_is_rejected() {
        let mut raster = cover(4, 4, PixelFormat::Rgb24);
        forge_prefix(&mut raster, BitRange::LSB, 3);
        let err = decode(&raster, BitRange::LSB).unwrap_err();
        assert!(matches!(err, CodecError::RecoveredSizeInvalid { size: 3 }));
        assert!(err.is_corrupt_prefix());
        assert_eq!(err.kind(), ErrorKind::Capacity);
    }

    #[test]
    fn huge_prefix_does_not_allocate() {
        let mut raster = cover(8, 8, PixelFormat::Gray8);
        forge_prefix(&mut raster, BitRange::LSB, u32::MAX);
        let err = decode(&raster, BitRange::LSB).unwrap_err();
        assert!(matches!(
            err,
            CodecError::RecoveredSizeInvalid { size: u32::MAX }
        ));
    }

    #[test]
    fn wrong_bit_range_does_not_recover_payload() {
        let stego = encode(
            &cover(32, 32, PixelFormat::Rgb24),
            b"secret",
            BitRange::new(0, 1).unwrap(),
        )
        .unwrap();
        match decode(&stego, BitRange::LSB) {
            Ok(payload) => assert_ne!(payload.as_ref(), b"secret"),
            Err(err) => assert_eq!(err.kind(), ErrorKind::Capacity),
        }
    }

    #[test]
    fn raster_too_small_for_prefix() {
        let raster = cover(2, 2, PixelFormat::Rgb24);
        let err = decode(&raster, BitRange::LSB).unwrap_err();
        assert!(matches!(
            err,
            CodecError::ShotsExhausted {
                index: 12,
                capacity: 12
            }
        ));
    }

    #[test]
    fn unsupported_format_fails_with_format_error() {
        let raster = Raster::new(16, 16, PixelFormat::Binary(BitDepth::Two));
        let err = decode(&raster, BitRange::LSB).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Raster(RasterError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn peek_length_reports_without_failing() {
        let stego = encode(&cover(8, 8, PixelFormat::Rgb24), b"abc", BitRange::LSB).unwrap();
        let report = Decoder::default().peek_length(&stego).unwrap();
        assert_eq!(report.length, 3);
        assert_eq!(report.framed_bits, 56);
        assert_eq!(report.capacity_bits, 192);
        assert!(report.plausible);

        let mut forged = cover(4, 4, PixelFormat::Rgb24);
        forge_prefix(&mut forged, BitRange::LSB, 1000);
        let report = Decoder::default().peek_length(&forged).unwrap();
        assert_eq!(report.length, 1000);
        assert!(!report.plausible);
    }

    #[test]
    fn decoder_and_encoder_share_config() {
        let range = BitRange::new(3, 7).unwrap();
        let stego = Encoder::new(range)
            .encode(&cover(10, 10, PixelFormat::Gray8), b"shared")
            .unwrap();
        let payload = Decoder::new(range).decode(&stego).unwrap();
        assert_eq!(payload.as_ref(), b"shared");
        assert_eq!(Decoder::new(range).config().bit_range, range);
    }
}
