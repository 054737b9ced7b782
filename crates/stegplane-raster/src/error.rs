use crate::format::PixelFormat;

/// Errors that can occur when addressing pixel samples.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The pixel format has no addressable layers (1/2/4-bit indexed images).
    #[error("unsupported pixel format {0} (no addressable layers)")]
    UnsupportedFormat(PixelFormat),

    /// The bit position is outside the range valid for the pixel format.
    #[error("bit position {position} out of range for this image (0-{max})")]
    BitPositionOutOfRange { position: u8, max: u8 },

    /// The layer index is outside `[0, layers)`.
    #[error("layer {layer} is incorrect for image type ({layers} layers)")]
    LayerOutOfRange { layer: u8, layers: u8 },

    /// The pixel coordinate lies outside the raster.
    #[error("pixel ({x}, {y}) outside {width}x{height} raster")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// The sample buffer does not match `width * height`.
    #[error("sample buffer holds {actual} pixels, expected {expected}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// The image codec failed while reading or writing a raster file.
    #[cfg(feature = "image")]
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// An I/O error occurred while reading or writing a raster file.
    #[error("raster I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;
