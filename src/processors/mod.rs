// pixelize/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod pixelate;

pub use batch::BatchProcessor;
pub use compressor::Compressor;
pub use loader::Loader;
pub use pixelate::{
    intermediate_dimensions, pixelate, Pixelate, DOWNSCALE_FILTER, MAX_INTERMEDIATE_PIXELS,
    UPSCALE_FILTER,
};

pub mod prelude {
    pub use super::{Compressor, Loader, Pixelate};
}
