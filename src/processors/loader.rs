// pixelize/src/processors/loader.rs
use crate::core::{PixelizeError, Result};
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    /// Decodes `path`, guessing the format from its contents rather than its
    /// extension. Read and decode failures, including a missing file, map to
    /// `Decode`; an image over the dimension limit is `InvalidParameter`.
    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        let decode_err = |source: image::ImageError| PixelizeError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;

        let (width, height) = image.dimensions();

        if let Some((max_w, max_h)) = self.max_dimensions {
            if width > max_w || height > max_h {
                return Err(PixelizeError::InvalidParameter(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
