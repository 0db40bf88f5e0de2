// pixelize/src/core/mod.rs
pub mod processor;
pub mod progress;

use std::num::NonZeroU32;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SIZES: [u32; 3] = [16, 32, 64];

/// Maximum dimension of the intermediate downscale. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelationSpec(NonZeroU32);

impl PixelationSpec {
    pub fn new(size: u32) -> Result<Self> {
        NonZeroU32::new(size).map(Self).ok_or_else(|| {
            PixelizeError::InvalidParameter("Pixelation size must be greater than 0".to_string())
        })
    }

    pub fn size(&self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for PixelationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub sizes: Vec<u32>,
    pub optimize_png: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            optimize_png: false,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.specs().map(|_| ())
    }

    /// Validated sizes in configured order, duplicates dropped.
    pub fn specs(&self) -> Result<Vec<PixelationSpec>> {
        if self.sizes.is_empty() {
            return Err(PixelizeError::InvalidParameter(
                "At least one pixelation size must be specified".to_string(),
            ));
        }

        let mut specs: Vec<PixelationSpec> = Vec::with_capacity(self.sizes.len());
        for &size in &self.sizes {
            let spec = PixelationSpec::new(size)?;
            if !specs.contains(&spec) {
                specs.push(spec);
            }
        }

        Ok(specs)
    }
}

/// Where a batch takes its source files from.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Enumerated non-recursively through the extension allow-list.
    Directory(PathBuf),
    /// Used as given, in order.
    Files(Vec<PathBuf>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputArtifact {
    pub source: PathBuf,
    pub path: PathBuf,
    pub size: u32,
    pub bytes: u64,
}

/// A failure isolated to one file (`size: None`) or one (file, size) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitError {
    pub source: PathBuf,
    pub size: Option<u32>,
    pub message: String,
}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.source.to_string_lossy());

        match self.size {
            Some(size) => write!(f, "Error processing size {} for {}: {}", size, name, self.message),
            None => write!(f, "Error opening {}: {}", self.source.display(), self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

#[derive(Debug)]
pub struct BatchSummary {
    pub files_total: usize,
    pub files_processed: usize,
    pub artifacts: Vec<OutputArtifact>,
    pub errors: Vec<UnitError>,
    pub outcome: Outcome,
}

impl BatchSummary {
    pub fn new(files_total: usize) -> Self {
        Self {
            files_total,
            files_processed: 0,
            artifacts: Vec::new(),
            errors: Vec::new(),
            outcome: Outcome::Completed,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.artifacts.iter().map(|a| a.bytes).sum()
    }
}

#[derive(Error, Debug)]
pub enum PixelizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input directory '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, PixelizeError>;
