// pixelize/src/core/processor.rs
use super::{OutputArtifact, PixelationSpec, PixelizeError, Result};
use crate::processors::{Compressor, Loader, Pixelate};
use image::GenericImageView;
use std::path::Path;

/// Pixelates a single file at a single size.
pub struct Pixelator {
    loader: Loader,
    compressor: Compressor,
}

impl Pixelator {
    pub fn new(optimize_png: bool) -> Self {
        Self {
            loader: Loader::new(),
            compressor: Compressor::new().with_png_optimization(optimize_png),
        }
    }

    pub fn pixelate_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        spec: PixelationSpec,
        output_path: Q,
    ) -> Result<OutputArtifact> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        if !input_path.is_file() {
            return Err(PixelizeError::InvalidParameter(format!(
                "Input file does not exist: {}",
                input_path.display()
            )));
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let image = self.loader.load(input_path)?;
        let (width, height) = image.dimensions();
        log::info!(
            "Processing {} (Original size: {}x{})",
            input_path.display(),
            width,
            height
        );

        let pixelated = Pixelate::new(spec).apply(&image)?;
        let bytes = self.compressor.save_png(&pixelated, output_path)?;

        Ok(OutputArtifact {
            source: input_path.to_path_buf(),
            path: output_path.to_path_buf(),
            size: spec.size(),
            bytes,
        })
    }
}

impl Default for Pixelator {
    fn default() -> Self {
        Self::new(false)
    }
}
