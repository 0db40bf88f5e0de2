// pixelize/src/processors/compressor.rs
use crate::core::{PixelizeError, Result};
use image::{ColorType, DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;
use std::path::Path;

const OPTIMIZATION_PRESET: u8 = 2;

/// Writes images as PNG, the only output format.
pub struct Compressor {
    optimize_png: bool,
}

impl Compressor {
    pub fn new() -> Self {
        Self { optimize_png: false }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        // The PNG encoder has no float sample support.
        match image.color() {
            ColorType::Rgb32F => DynamicImage::ImageRgb16(image.to_rgb16())
                .write_to(&mut buffer, ImageFormat::Png)?,
            ColorType::Rgba32F => DynamicImage::ImageRgba16(image.to_rgba16())
                .write_to(&mut buffer, ImageFormat::Png)?,
            _ => image.write_to(&mut buffer, ImageFormat::Png)?,
        }

        let data = buffer.into_inner();
        if !self.optimize_png {
            return Ok(data);
        }

        let options = Options::from_preset(OPTIMIZATION_PRESET);
        let optimized = optimize_from_memory(&data, &options)
            .map_err(|e| PixelizeError::Encode(format!("PNG optimization failed: {}", e)))?;

        log::debug!(
            "PNG optimized: {} -> {} bytes",
            data.len(),
            optimized.len()
        );

        Ok(optimized)
    }

    /// Encodes and writes `image` to `path`, returning the bytes written.
    pub fn save_png(&self, image: &DynamicImage, path: &Path) -> Result<u64> {
        let data = self.encode_png(image)?;
        std::fs::write(path, &data)?;

        log::debug!("Saved {} ({} bytes)", path.display(), data.len());

        Ok(data.len() as u64)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}
