use crate::coord::BitCoordinate;
use crate::error::{RasterError, Result};
use crate::format::{LayerCount, PixelFormat};
use crate::plane::BitPlane;

/// Width of one color layer inside a packed three-layer sample.
const LAYER_SHIFT: u32 = 8;

/// A decoded image as a plain grid of pixel samples.
///
/// Samples are stored row-major, one `u32` per pixel:
/// - single-layer formats keep the channel value in the low bits
/// - three-layer formats pack `0xAARRGGBB` (blue in the lowest byte)
/// - packed 15/16-bit formats keep each native channel in its own byte lane
///
/// The pixel format is fixed for the lifetime of the raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    format: PixelFormat,
    samples: Vec<u32>,
}

impl Raster {
    /// Create a zero-filled raster.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            samples: vec![0; width as usize * height as usize],
        }
    }

    /// Create a raster from an existing row-major sample buffer.
    pub fn from_samples(
        width: u32,
        height: u32,
        format: PixelFormat,
        samples: Vec<u32>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(RasterError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            samples,
        })
    }

    /// Create a raster whose samples are produced by `f(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        format: PixelFormat,
        mut f: impl FnMut(u32, u32) -> u32,
    ) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            format,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Number of addressable layers, derived from the pixel format.
    pub fn layer_count(&self) -> LayerCount {
        self.format.layer_count()
    }

    /// Number of pixels in the grid.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// The raw sample at `(x, y)`.
    pub fn sample(&self, x: u32, y: u32) -> Result<u32> {
        let index = self.index_of(x, y)?;
        Ok(self.samples[index])
    }

    /// Replace the raw sample at `(x, y)`.
    pub fn set_sample(&mut self, x: u32, y: u32, value: u32) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.samples[index] = value;
        Ok(())
    }

    /// All samples in row-major order.
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// Consume the raster and return its sample buffer.
    pub fn into_samples(self) -> Vec<u32> {
        self.samples
    }

    /// Read a single bit.
    ///
    /// Fails with a [`RasterError`] if the format has no layers, or if the
    /// layer, bit position or pixel lies outside the valid range.
    pub fn bit(&self, coord: BitCoordinate) -> Result<bool> {
        let shift = self.shift_for(coord)?;
        let index = self.index_of(coord.x, coord.y)?;
        Ok((self.samples[index] >> shift) & 1 == 1)
    }

    /// Write a single bit, leaving every other bit of the sample unchanged.
    pub fn set_bit(&mut self, coord: BitCoordinate, bit: bool) -> Result<()> {
        let shift = self.shift_for(coord)?;
        let index = self.index_of(coord.x, coord.y)?;
        let mask = 1u32.rotate_left(shift);
        let sample = &mut self.samples[index];
        if bit {
            *sample |= mask;
        } else {
            *sample &= !mask;
        }
        Ok(())
    }

    /// Extract one bit plane of one layer as a boolean grid.
    pub fn bit_plane(&self, layer: u8, bit_position: u8) -> Result<BitPlane> {
        let shift = self.shift_for(BitCoordinate::new(0, 0, layer, bit_position))?;
        let bits = self
            .samples
            .iter()
            .map(|sample| (sample >> shift) & 1 == 1)
            .collect();
        Ok(BitPlane::from_bits(self.width, self.height, bits))
    }

    /// Validate layer and bit position, returning the bit offset inside the sample.
    fn shift_for(&self, coord: BitCoordinate) -> Result<u32> {
        let layers = self.layer_count();
        if !layers.is_supported() {
            return Err(RasterError::UnsupportedFormat(self.format));
        }

        let max = self.format.max_bit_position();
        if coord.bit_position > max {
            return Err(RasterError::BitPositionOutOfRange {
                position: coord.bit_position,
                max,
            });
        }
        if coord.layer >= layers.get() {
            return Err(RasterError::LayerOutOfRange {
                layer: coord.layer,
                layers: layers.get(),
            });
        }

        Ok(match layers {
            LayerCount::Single => u32::from(coord.bit_position),
            _ => u32::from(coord.layer) * LAYER_SHIFT + u32::from(coord.bit_position),
        })
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}
