use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use pixelize::{
    format_file_size, pixelated_file_name, BatchConfig, BatchProcessor, Cli, Commands,
    OutputArtifact, PixelationSpec, Pixelator, ProgressEvent, ProgressSink, UnitError,
};
use std::path::{Path, PathBuf};

const PROGRESS_STEPS: u64 = 1000;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Some(Commands::Preview {
            file,
            size,
            output,
            optimize,
        }) => process_preview(file, size, output, optimize),
        None => process_batch(&cli.input, &cli.output, cli.sizes, cli.optimize),
    }
}

fn process_batch(input: &Path, output: &Path, sizes: Vec<u32>, optimize: bool) -> Result<()> {
    let config = BatchConfig {
        sizes,
        optimize_png: optimize,
    };

    let processor = BatchProcessor::new(config).context("Invalid pixelation sizes")?;

    let mut console = ConsoleProgress::new();
    let summary = processor
        .process_directory(input, output, &mut console)
        .with_context(|| format!("Batch processing of '{}' failed", input.display()))?;
    console.finish();

    if summary.files_total == 0 {
        println!("No image files found in '{}'.", input.display());
        return Ok(());
    }

    println!(
        "Batch processing complete. Processed {} images into {} files ({}) in: {}",
        summary.files_processed,
        summary.artifacts.len(),
        format_file_size(summary.bytes_written()),
        output.display()
    );

    if !summary.errors.is_empty() {
        println!("{} errors occurred.", summary.errors.len());
    }

    Ok(())
}

fn process_preview(
    file: PathBuf,
    size: u32,
    output: Option<PathBuf>,
    optimize: bool,
) -> Result<()> {
    let spec = PixelationSpec::new(size)?;
    let output_path = output.unwrap_or_else(|| PathBuf::from(pixelated_file_name(&file, spec)));

    let artifact = Pixelator::new(optimize)
        .pixelate_file(&file, spec, &output_path)
        .with_context(|| format!("Failed to pixelate {}", file.display()))?;

    println!(
        "Pixelated image saved to: {} ({})",
        artifact.path.display(),
        format_file_size(artifact.bytes)
    );

    Ok(())
}

/// Progress bar that also echoes each save and failure above itself.
struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(PROGRESS_STEPS);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish();
    }
}

impl ProgressSink for ConsoleProgress {
    fn progress(&mut self, event: &ProgressEvent) {
        let position = (event.fraction * PROGRESS_STEPS as f64).round() as u64;
        self.bar.set_position(position);
        self.bar.set_message(event.message.clone());
    }

    fn saved(&mut self, artifact: &OutputArtifact) {
        self.bar.println(format!("  Saved: {}", artifact.path.display()));
    }

    fn failed(&mut self, error: &UnitError) {
        self.bar.println(format!("  {}", error));
    }
}
