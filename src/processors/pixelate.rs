// pixelize/src/processors/pixelate.rs
use crate::core::{PixelationSpec, PixelizeError, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Filter for the shrink pass. Smooths detail away before the blocks form.
pub const DOWNSCALE_FILTER: FilterType = FilterType::Triangle;
/// Filter for the grow pass. Produces the visible blocks.
pub const UPSCALE_FILTER: FilterType = FilterType::Nearest;

/// Ceiling on the resize working buffers, unless the source is already larger.
pub const MAX_INTERMEDIATE_PIXELS: u64 = 1 << 26;

/// Size of the intermediate image for a `width`x`height` source.
///
/// The longer side becomes `size`; the other is scaled by the aspect ratio,
/// truncated toward zero and clamped to at least 1. Square images take the
/// `height == size` branch.
pub fn intermediate_dimensions(width: u32, height: u32, spec: PixelationSpec) -> (u32, u32) {
    let size = spec.size();
    let aspect_ratio = width as f64 / height as f64;

    let (new_width, new_height) = if width > height {
        (size, (size as f64 / aspect_ratio) as u32)
    } else {
        ((size as f64 * aspect_ratio) as u32, size)
    };

    (new_width.max(1), new_height.max(1))
}

/// Pixelates `image`, returning a new image of the same dimensions.
pub fn pixelate(image: &DynamicImage, spec: PixelationSpec) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PixelizeError::EmptyImage);
    }

    let (small_width, small_height) = intermediate_dimensions(width, height, spec);

    // Each separable pass buffers at most max(w) x max(h) of source and target.
    let working = (width.max(small_width) as u64)
        .checked_mul(height.max(small_height) as u64)
        .unwrap_or(u64::MAX);
    let limit = MAX_INTERMEDIATE_PIXELS.max(width as u64 * height as u64);
    if working > limit {
        return Err(PixelizeError::InvalidParameter(format!(
            "Pixelation size {} needs a {}x{} intermediate for a {}x{} image, over the {} pixel limit",
            spec, small_width, small_height, width, height, limit
        )));
    }

    log::debug!(
        "Pixelating {}x{} via {}x{} (size {})",
        width,
        height,
        small_width,
        small_height,
        spec
    );

    let small = image.resize_exact(small_width, small_height, DOWNSCALE_FILTER);
    Ok(small.resize_exact(width, height, UPSCALE_FILTER))
}

#[derive(Debug, Clone, Copy)]
pub struct Pixelate {
    spec: PixelationSpec,
}

impl Pixelate {
    pub fn new(spec: PixelationSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> PixelationSpec {
        self.spec
    }

    pub fn apply(&self, image: &DynamicImage) -> Result<DynamicImage> {
        pixelate(image, self.spec)
    }
}
