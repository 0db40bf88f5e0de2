// pixelize/src/processors/batch.rs
use crate::core::progress::{ProgressEvent, ProgressSink};
use crate::core::{
    BatchConfig, BatchSummary, InputSource, Outcome, OutputArtifact, PixelationSpec,
    PixelizeError, Result, UnitError,
};
use crate::processors::prelude::*;
use crate::utils::{collect_image_files, pixelated_output_path};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Applies every configured size to every source file, one file at a time.
///
/// Decode failures skip the file, write failures skip the size; neither stops
/// the run. Only setup problems (bad sizes, missing input directory, unusable
/// output directory) surface as `Err`.
pub struct BatchProcessor {
    specs: Vec<PixelationSpec>,
    loader: Loader,
    compressor: Compressor,
    cancel: Option<Arc<AtomicBool>>,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Result<Self> {
        let specs = config.specs()?;

        Ok(Self {
            specs,
            loader: Loader::new(),
            compressor: Compressor::new().with_png_optimization(config.optimize_png),
            cancel: None,
        })
    }

    /// Checked between files. A file already started always finishes.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.specs.iter().map(|s| s.size()).collect()
    }

    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<BatchSummary> {
        self.run(&InputSource::Directory(input_dir.to_path_buf()), output_dir, sink)
    }

    pub fn run(
        &self,
        input: &InputSource,
        output_dir: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<BatchSummary> {
        let files = self.resolve_input(input)?;
        self.prepare_output_dir(output_dir)?;

        let total = files.len();
        let mut summary = BatchSummary::new(total);

        if total == 0 {
            log::warn!("No image files to process");
            sink.progress(&ProgressEvent::new(0.0, "No image files found"));
            sink.progress(&ProgressEvent::new(1.0, "Processing complete! Processed 0 images."));
            return Ok(summary);
        }

        log::info!(
            "Processing {} images into {} at sizes {:?}",
            total,
            output_dir.display(),
            self.sizes()
        );
        sink.progress(&ProgressEvent::new(
            0.0,
            format!("Starting batch processing of {} images...", total),
        ));

        for (index, path) in files.iter().enumerate() {
            if self.is_cancelled() {
                log::info!("Batch cancelled after {}/{} images", index, total);
                summary.outcome = Outcome::Cancelled;
                sink.progress(&ProgressEvent::of(
                    index,
                    total,
                    format!("Cancelled after {}/{} images", index, total),
                ));
                return Ok(summary);
            }

            sink.progress(&ProgressEvent::of(
                index,
                total,
                format!("Processing {}/{}: {}", index + 1, total, display_name(path)),
            ));

            self.process_file(path, output_dir, &mut summary, sink);
            summary.files_processed += 1;

            sink.progress(&ProgressEvent::of(
                index + 1,
                total,
                format!("Processed {}/{} images", index + 1, total),
            ));
        }

        log::info!(
            "Batch complete: {} images, {} outputs, {} errors",
            summary.files_processed,
            summary.artifacts.len(),
            summary.errors.len()
        );
        sink.progress(&ProgressEvent::new(
            1.0,
            format!(
                "Processing complete! Processed {} images.",
                summary.files_processed
            ),
        ));

        Ok(summary)
    }

    fn process_file(
        &self,
        path: &Path,
        output_dir: &Path,
        summary: &mut BatchSummary,
        sink: &mut dyn ProgressSink,
    ) {
        let image = match self.loader.load(path) {
            Ok(image) => image,
            Err(e) => {
                let error = UnitError {
                    source: path.to_path_buf(),
                    size: None,
                    message: decode_message(e),
                };
                log::warn!("{}", error);
                sink.failed(&error);
                summary.errors.push(error);
                return;
            }
        };

        let (width, height) = image.dimensions();
        log::info!(
            "Processing {} (Original size: {}x{})",
            display_name(path),
            width,
            height
        );

        for &spec in &self.specs {
            match self.render(&image, path, spec, output_dir) {
                Ok(artifact) => {
                    log::debug!("Saved: {}", artifact.path.display());
                    sink.saved(&artifact);
                    summary.artifacts.push(artifact);
                }
                Err(e) => {
                    let error = UnitError {
                        source: path.to_path_buf(),
                        size: Some(spec.size()),
                        message: e.to_string(),
                    };
                    log::warn!("{}", error);
                    sink.failed(&error);
                    summary.errors.push(error);
                }
            }
        }
    }

    fn render(
        &self,
        image: &DynamicImage,
        source: &Path,
        spec: PixelationSpec,
        output_dir: &Path,
    ) -> Result<OutputArtifact> {
        let pixelated = Pixelate::new(spec).apply(image)?;
        let output_path = pixelated_output_path(output_dir, source, spec);
        let bytes = self.compressor.save_png(&pixelated, &output_path)?;

        Ok(OutputArtifact {
            source: source.to_path_buf(),
            path: output_path,
            size: spec.size(),
            bytes,
        })
    }

    fn resolve_input(&self, input: &InputSource) -> Result<Vec<PathBuf>> {
        match input {
            InputSource::Directory(dir) => collect_image_files(dir),
            InputSource::Files(files) => Ok(files.clone()),
        }
    }

    fn prepare_output_dir(&self, output_dir: &Path) -> Result<()> {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(PixelizeError::OutputDirectory {
                path: output_dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path exists but is not a directory",
                ),
            });
        }

        std::fs::create_dir_all(output_dir).map_err(|source| PixelizeError::OutputDirectory {
            path: output_dir.to_path_buf(),
            source,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// The unit error already names the file.
fn decode_message(error: PixelizeError) -> String {
    match error {
        PixelizeError::Decode { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
