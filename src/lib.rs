pub mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{Cli, Commands};
pub use crate::core::processor::Pixelator;
pub use crate::core::progress::{NoProgress, ProgressEvent, ProgressSink};
pub use crate::core::{
    BatchConfig, BatchSummary, InputSource, Outcome, OutputArtifact,
    PixelationSpec, PixelizeError, Result, UnitError, DEFAULT_SIZES,
};
pub use crate::processors::{
    intermediate_dimensions, pixelate, BatchProcessor, Compressor, Loader, Pixelate,
    DOWNSCALE_FILTER, MAX_INTERMEDIATE_PIXELS, UPSCALE_FILTER,
};
pub use crate::utils::{
    collect_image_files, format_file_size, is_supported_format, parse_sizes,
    pixelated_file_name, pixelated_output_path, IMAGE_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchConfig, BatchProcessor, InputSource, PixelationSpec, Pixelator, ProgressEvent,
        ProgressSink,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
