// pixelize/src/cli/mod.rs
use crate::core::DEFAULT_SIZES;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pixelize",
    version,
    about = "Pixelate images in a directory.",
    subcommand_precedence_over_arg = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input directory containing images
    #[arg(short, long, default_value = "images")]
    pub input: PathBuf,

    /// Output directory for processed images
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Pixelation sizes, space or comma separated (e.g. 16 32 64)
    #[arg(
        short,
        long,
        num_args = 1..,
        value_delimiter = ',',
        default_values_t = DEFAULT_SIZES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub sizes: Vec<u32>,

    /// Run a lossless optimization pass over every PNG written
    #[arg(long)]
    pub optimize: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pixelate a single image at one size
    Preview {
        /// Image to pixelate
        file: PathBuf,

        /// Pixelation size
        #[arg(short, long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,

        /// Output file (defaults to {stem}_{size}_pixelated.png in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run a lossless optimization pass over the PNG
        #[arg(long)]
        optimize: bool,
    },
}
