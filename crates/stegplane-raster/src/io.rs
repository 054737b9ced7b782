//! Raster file I/O via the `image` crate.
//!
//! Decoded images map onto pixel formats as follows:
//! - `Luma8` → [`PixelFormat::Gray8`]
//! - `Luma16` → [`PixelFormat::Gray16`]
//! - `Rgb8` → [`PixelFormat::Rgb24`]
//! - `Rgba8` → [`PixelFormat::Argb32`]
//! - anything else is converted to `Rgba8` first
//!
//! The format is classified from the file's original color type, not from
//! the expanded buffer the decoder hands back. Sources stored with 1, 2 or 4
//! bits per sample (gray or palette) load as [`PixelFormat::Binary`] and
//! therefore expose no layers. 8-bit palette images are expanded to true
//! color by the decoder and load as three-layer rasters.
//!
//! Formats the `image` crate cannot store (palette, packed 15/16-bit) are
//! widened to 8-bit channels when written.

use std::path::Path;

use image::{
    DynamicImage, ExtendedColorType, GrayImage, ImageBuffer, ImageDecoder, ImageReader, Luma,
    RgbImage, RgbaImage,
};
use tracing::debug;

use crate::error::{RasterError, Result};
use crate::format::{BitDepth, PixelFormat};
use crate::meta::StegoImage;
use crate::plane::BitPlane;
use crate::raster::Raster;

/// Read and decode an image file into a [`StegoImage`].
pub fn read_raster(path: impl AsRef<Path>) -> Result<StegoImage> {
    let path = path.as_ref();
    let decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let source = decoder.original_color_type();
    let decoded = DynamicImage::from_decoder(decoder)?;
    let raster = match low_depth(source) {
        Some(depth) => binary_from_dynamic(&decoded, depth)?,
        None => raster_from_dynamic(decoded)?,
    };
    debug!(
        ?path,
        ?source,
        width = raster.width(),
        height = raster.height(),
        format = %raster.format(),
        "decoded raster"
    );
    Ok(StegoImage::new(raster, Some(path)))
}

/// Encode a raster and write it to `path`; the container is chosen by extension.
pub fn write_raster(raster: &Raster, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    raster_to_dynamic(raster)?.save(path)?;
    debug!(?path, format = %raster.format(), "wrote raster");
    Ok(())
}

/// Render a bit plane as a black and white grayscale image at `path`.
pub fn write_bit_plane(plane: &BitPlane, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let expected = plane.width() as usize * plane.height() as usize;
    let raw = plane.to_luma_bytes();
    let actual = raw.len();
    let buf = GrayImage::from_raw(plane.width(), plane.height(), raw)
        .ok_or(RasterError::SampleCountMismatch { expected, actual })?;
    buf.save(path)?;
    debug!(?path, ones = plane.count_ones(), "wrote bit plane");
    Ok(())
}

/// Convert a decoded image into a raster, taking ownership of its buffer.
pub fn raster_from_dynamic(image: DynamicImage) -> Result<Raster> {
    let (width, height) = (image.width(), image.height());
    match image {
        DynamicImage::ImageLuma8(buf) => Raster::from_samples(
            width,
            height,
            PixelFormat::Gray8,
            buf.into_raw().into_iter().map(u32::from).collect(),
        ),
        DynamicImage::ImageLuma16(buf) => Raster::from_samples(
            width,
            height,
            PixelFormat::Gray16,
            buf.into_raw().into_iter().map(u32::from).collect(),
        ),
        DynamicImage::ImageRgb8(buf) => Raster::from_samples(
            width,
            height,
            PixelFormat::Rgb24,
            buf.as_raw()
                .chunks_exact(3)
                .map(|p| pack(0, p[0], p[1], p[2]))
                .collect(),
        ),
        other => {
            let buf = other.to_rgba8();
            Raster::from_samples(
                width,
                height,
                PixelFormat::Argb32,
                buf.as_raw()
                    .chunks_exact(4)
                    .map(|p| pack(p[3], p[0], p[1], p[2]))
                    .collect(),
            )
        }
    }
}

/// Convert a raster into an encodable image.
pub fn raster_to_dynamic(raster: &Raster) -> Result<DynamicImage> {
    let (width, height) = (raster.width(), raster.height());
    let samples = raster.samples();
    let mismatch = || RasterError::SampleCountMismatch {
        expected: width as usize * height as usize,
        actual: samples.len(),
    };

    let image = match raster.format() {
        PixelFormat::Gray8 | PixelFormat::Indexed8 => {
            let raw = samples.iter().map(|s| *s as u8).collect();
            DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, raw).ok_or_else(mismatch)?)
        }
        PixelFormat::Gray16 => {
            let raw = samples.iter().map(|s| *s as u16).collect();
            let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
                ImageBuffer::from_raw(width, height, raw).ok_or_else(mismatch)?;
            DynamicImage::ImageLuma16(buf)
        }
        PixelFormat::Binary(depth) => {
            let max = depth.max_value();
            let scale = u8::MAX / max;
            let raw = samples.iter().map(|s| (*s as u8 & max) * scale).collect();
            DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, raw).ok_or_else(mismatch)?)
        }
        PixelFormat::Rgb24 => {
            let raw = samples
                .iter()
                .flat_map(|s| {
                    let [_, r, g, b] = s.to_be_bytes();
                    [r, g, b]
                })
                .collect();
            DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, raw).ok_or_else(mismatch)?)
        }
        PixelFormat::Argb32 => {
            let raw = samples
                .iter()
                .flat_map(|s| {
                    let [a, r, g, b] = s.to_be_bytes();
                    [r, g, b, a]
                })
                .collect();
            DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, raw).ok_or_else(mismatch)?)
        }
        PixelFormat::Rgb555 | PixelFormat::Rgb565 => {
            let green_bits = if raster.format() == PixelFormat::Rgb565 { 6 } else { 5 };
            let raw = samples
                .iter()
                .flat_map(|s| {
                    let [_, r, g, b] = s.to_be_bytes();
                    [widen(r, 5), widen(g, green_bits), widen(b, 5)]
                })
                .collect();
            DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, raw).ok_or_else(mismatch)?)
        }
    };
    Ok(image)
}

/// The sample depth of a source stored with fewer than 8 bits per sample.
fn low_depth(color: ExtendedColorType) -> Option<BitDepth> {
    match color {
        // palette sources report their index depth as unknown
        ExtendedColorType::L1 | ExtendedColorType::Unknown(1) => Some(BitDepth::One),
        ExtendedColorType::L2 | ExtendedColorType::Unknown(2) => Some(BitDepth::Two),
        ExtendedColorType::L4 | ExtendedColorType::Unknown(4) => Some(BitDepth::Four),
        _ => None,
    }
}

/// Quantize the luma of a low-depth source back to its native sample range.
fn binary_from_dynamic(image: &DynamicImage, depth: BitDepth) -> Result<Raster> {
    let luma = image.to_luma8();
    let max = u32::from(depth.max_value());
    Raster::from_samples(
        luma.width(),
        luma.height(),
        PixelFormat::Binary(depth),
        luma.as_raw()
            .iter()
            .map(|v| (u32::from(*v) * max + 127) / 255)
            .collect(),
    )
}

fn pack(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

/// Scale a `bits`-wide channel value to 8 bits by replicating its high bits.
fn widen(value: u8, bits: u32) -> u8 {
    let value = value & ((1u8 << bits) - 1);
    (value << (8 - bits)) | (value >> (2 * bits - 8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LayerCount;

    #[test]
    fn rgb8_maps_to_rgb24_with_blue_low() {
        let buf = RgbImage::from_raw(1, 1, vec![0x11, 0x22, 0x33]).unwrap();
        let raster = raster_from_dynamic(DynamicImage::ImageRgb8(buf)).unwrap();
        assert_eq!(raster.format(), PixelFormat::Rgb24);
        assert_eq!(raster.sample(0, 0).unwrap(), 0x0011_2233);
    }

    #[test]
    fn rgba8_maps_to_argb32() {
        let buf = RgbaImage::from_raw(1, 1, vec![0x11, 0x22, 0x33, 0x44]).unwrap();
        let raster = raster_from_dynamic(DynamicImage::ImageRgba8(buf)).unwrap();
        assert_eq!(raster.format(), PixelFormat::Argb32);
        assert_eq!(raster.sample(0, 0).unwrap(), 0x4411_2233);
    }

    #[test]
    fn gray_round_trips_through_dynamic_image() {
        let raster = Raster::from_fn(3, 2, PixelFormat::Gray8, |x, y| x * 40 + y);
        let image = raster_to_dynamic(&raster).unwrap();
        let back = raster_from_dynamic(image).unwrap();
        assert_eq!(back, raster);
    }

    #[test]
    fn argb_round_trips_through_dynamic_image() {
        let raster = Raster::from_fn(2, 2, PixelFormat::Argb32, |x, y| 0xFF00_0000 | (x << 16) | y);
        let back = raster_from_dynamic(raster_to_dynamic(&raster).unwrap()).unwrap();
        assert_eq!(back, raster);
    }

    fn unique_temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::path::PathBuf::from(format!(
            "/tmp/stegplane-raster-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    fn write_png(path: &Path, color: png::ColorType, depth: png::BitDepth, data: &[u8]) {
        let file = std::fs::File::create(path).expect("png should be creatable");
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 8, 2);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if color == png::ColorType::Indexed {
            encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
        }
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(data).expect("png data");
    }

    #[test]
    fn one_bit_gray_png_has_no_layers() {
        let dir = unique_temp_dir("l1");
        let path = dir.join("bilevel.png");
        // one byte per row of 8 pixels
        write_png(&path, png::ColorType::Grayscale, png::BitDepth::One, &[0b1010_0000, 0xFF]);

        let image = read_raster(&path).unwrap();
        assert_eq!(image.meta.format, PixelFormat::Binary(BitDepth::One));
        assert_eq!(image.meta.layers, LayerCount::Unsupported);
        assert_eq!(image.raster.sample(0, 0).unwrap(), 1);
        assert_eq!(image.raster.sample(1, 0).unwrap(), 0);
        assert_eq!(image.raster.sample(7, 1).unwrap(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn one_bit_palette_png_has_no_layers() {
        let dir = unique_temp_dir("p1");
        let path = dir.join("palette.png");
        write_png(&path, png::ColorType::Indexed, png::BitDepth::One, &[0x0F, 0xF0]);

        let image = read_raster(&path).unwrap();
        assert_eq!(image.meta.layers, LayerCount::Unsupported);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn eight_bit_gray_png_stays_single_layer() {
        let dir = unique_temp_dir("l8");
        let path = dir.join("gray.png");
        let data: Vec<u8> = (0..16).map(|v| v * 16).collect();
        write_png(&path, png::ColorType::Grayscale, png::BitDepth::Eight, &data);

        let image = read_raster(&path).unwrap();
        assert_eq!(image.meta.format, PixelFormat::Gray8);
        assert_eq!(image.raster.sample(1, 0).unwrap(), 16);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn binary_raster_writes_scaled_levels() {
        let raster = Raster::from_fn(2, 1, PixelFormat::Binary(BitDepth::Two), |x, _| x * 3);
        let image = raster_to_dynamic(&raster).unwrap().to_luma8();
        assert_eq!(image.as_raw(), &vec![0, 255]);
    }

    #[test]
    fn widen_replicates_high_bits() {
        assert_eq!(widen(0x1F, 5), 0xFF);
        assert_eq!(widen(0x3F, 6), 0xFF);
        assert_eq!(widen(0, 5), 0);
        assert_eq!(widen(0x10, 5), 0x84);
    }
}
