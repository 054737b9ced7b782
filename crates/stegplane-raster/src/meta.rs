use std::path::{Path, PathBuf};

use crate::format::{LayerCount, PixelFormat};
use crate::raster::Raster;

/// File name used when a raster has no known source path.
pub const DEFAULT_PATH: &str = "image.png";

/// Metadata carried alongside a raster: where it came from and how it is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub path: PathBuf,
    pub format: PixelFormat,
    pub layers: LayerCount,
}

impl ImageMeta {
    /// Describe `raster`, optionally loaded from `path`.
    pub fn describe(raster: &Raster, path: Option<&Path>) -> Self {
        Self {
            path: path.map_or_else(|| PathBuf::from(DEFAULT_PATH), Path::to_path_buf),
            format: raster.format(),
            layers: raster.layer_count(),
        }
    }
}

/// A cover or stego image: a pixel grid plus its metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegoImage {
    pub raster: Raster,
    pub meta: ImageMeta,
}

impl StegoImage {
    /// Wrap a raster, deriving its metadata.
    pub fn new(raster: Raster, path: Option<&Path>) -> Self {
        let meta = ImageMeta::describe(&raster, path);
        Self { raster, meta }
    }

    /// Replace the pixel grid, keeping the source path.
    pub fn with_raster(self, raster: Raster) -> Self {
        let path = self.meta.path;
        Self::new(raster, Some(&path))
    }

    pub fn path(&self) -> &Path {
        &self.meta.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_when_unknown() {
        let image = StegoImage::new(Raster::new(1, 1, PixelFormat::Gray8), None);
        assert_eq!(image.path(), Path::new(DEFAULT_PATH));
        assert_eq!(image.meta.layers, LayerCount::Single);
    }

    #[test]
    fn with_raster_keeps_path_and_rederives_layout() {
        let image = StegoImage::new(
            Raster::new(1, 1, PixelFormat::Gray8),
            Some(Path::new("/tmp/cover.png")),
        );
        let image = image.with_raster(Raster::new(2, 2, PixelFormat::Rgb24));
        assert_eq!(image.path(), Path::new("/tmp/cover.png"));
        assert_eq!(image.meta.format, PixelFormat::Rgb24);
        assert_eq!(image.meta.layers, LayerCount::Triple);
    }
}
