use std::fmt;
use std::io;

use stegplane_codec::{CodecError, ErrorKind};
use stegplane_frame::FrameError;
use stegplane_raster::RasterError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn raster_error(context: &str, err: RasterError) -> CliError {
    match err {
        RasterError::Io(source) => io_error(context, source),
        RasterError::Image(image::ImageError::IoError(source)) => io_error(context, source),
        RasterError::Image(other) => CliError::new(DATA_INVALID, format!("{context}: {other}")),
        RasterError::UnsupportedFormat(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        RasterError::LayerOutOfRange { .. } | RasterError::BitPositionOutOfRange { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

/// Map an encode failure to an exit code.
pub fn encode_error(err: CodecError) -> CliError {
    codec_error("encoding failed", err)
}

/// Map a decode failure to an exit code.
///
/// A corrupt length prefix keeps its own message; any other failure is
/// reported as an unrecoverable message.
pub fn decode_error(err: CodecError) -> CliError {
    if err.is_corrupt_prefix() {
        return CliError::new(DATA_INVALID, format!("decoding failed: {err}"));
    }
    match err.kind() {
        ErrorKind::Config => codec_error("decoding failed", err),
        _ => CliError::new(
            FAILURE,
            format!("decoding failed: no message could be recovered ({err})"),
        ),
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Raster(err) => raster_error(context, err),
        CodecError::Frame(err) => frame_error(context, err),
        other => match other.kind() {
            ErrorKind::Config => CliError::new(USAGE, format!("{context}: {other}")),
            ErrorKind::Capacity | ErrorKind::Format => {
                CliError::new(DATA_INVALID, format!("{context}: {other}"))
            }
            ErrorKind::StreamExhausted => CliError::new(INTERNAL, format!("{context}: {other}")),
        },
    }
}
