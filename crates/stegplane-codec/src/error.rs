use stegplane_frame::FrameError;
use stegplane_raster::{PixelFormat, RasterError};

/// Errors that can occur while embedding or extracting a payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The start bit is outside `0..=7`.
    #[error("start bit {0} not in range 0-7")]
    StartBitOutOfRange(u8),

    /// The end bit is outside `0..=7`.
    #[error("end bit {0} not in range 0-7")]
    EndBitOutOfRange(u8),

    /// The start bit lies above the end bit.
    #[error("end bit {end} must not be lower than start bit {start}")]
    BitRangeReversed { start: u8, end: u8 },

    /// The bit range reaches above the ceiling of the pixel format.
    #[error("end bit {end} exceeds the bit ceiling of {format} images (0-{max})")]
    BitRangeExceedsFormat {
        end: u8,
        max: u8,
        format: PixelFormat,
    },

    /// The payload does not fit the raster at encode time.
    #[error("message is too big for this image ({size} bytes); maximum size for this configuration: {max} bytes")]
    MessageTooLarge { size: u64, max: u64 },

    /// The decoded length prefix cannot describe a message in this raster.
    #[error("recovered message size is wrong: {size} bytes; parameters are wrong or image was distorted")]
    RecoveredSizeInvalid { size: u32 },

    /// The decoded payload would reach past the raster's capacity.
    #[error("message is bigger than supposed to be ({bits} bits, capacity {capacity})")]
    MessageOverflow { bits: u64, capacity: u64 },

    /// The sequencer ran out of addressable bits.
    #[error("no addressable bit left at index {index} (capacity {capacity})")]
    ShotsExhausted { index: u64, capacity: u64 },

    /// Pixel-level access failed.
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),

    /// Message bit stream failed.
    #[error("message stream error: {0}")]
    Frame(#[from] FrameError),
}

/// Broad classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid bit-range configuration.
    Config,
    /// Payload or recovered length does not fit the raster.
    Capacity,
    /// Unsupported pixel format or out-of-range addressing.
    Format,
    /// Message bit stream read or written past its length.
    StreamExhausted,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::StartBitOutOfRange(_)
            | CodecError::EndBitOutOfRange(_)
            | CodecError::BitRangeReversed { .. }
            | CodecError::BitRangeExceedsFormat { .. } => ErrorKind::Config,
            CodecError::MessageTooLarge { .. }
            | CodecError::RecoveredSizeInvalid { .. }
            | CodecError::MessageOverflow { .. }
            | CodecError::ShotsExhausted { .. }
            | CodecError::Frame(FrameError::PayloadTooLarge { .. }) => ErrorKind::Capacity,
            CodecError::Frame(_) => ErrorKind::StreamExhausted,
            CodecError::Raster(_) => ErrorKind::Format,
        }
    }

    /// Returns true if the error proves the embedded length prefix is corrupt.
    pub fn is_corrupt_prefix(&self) -> bool {
        matches!(
            self,
            CodecError::RecoveredSizeInvalid { .. } | CodecError::MessageOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
