// pixelize/src/utils/mod.rs
use crate::core::{PixelationSpec, PixelizeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

/// `{stem}_{size}_pixelated.png` inside `output_dir`.
pub fn pixelated_output_path(output_dir: &Path, input_path: &Path, spec: PixelationSpec) -> PathBuf {
    output_dir.join(pixelated_file_name(input_path, spec))
}

pub fn pixelated_file_name(input_path: &Path, spec: PixelationSpec) -> String {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "image".into());

    format!("{}_{}_pixelated.png", stem, spec.size())
}

pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Regular files directly inside `input_dir` whose extension is on the
/// allow-list, sorted by path.
pub fn collect_image_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(PixelizeError::InputNotFound(input_dir.to_path_buf()));
    }

    if !input_dir.is_dir() {
        return Err(PixelizeError::NotADirectory(input_dir.to_path_buf()));
    }

    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Only a failure on the directory itself is fatal.
            Err(e) if e.depth() == 0 => {
                return Err(match e.into_io_error() {
                    Some(io) => PixelizeError::Io(io),
                    None => PixelizeError::InvalidParameter(format!(
                        "Failed to read directory: {}",
                        input_dir.display()
                    )),
                })
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", input_dir.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_supported_format(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Parses a comma- or whitespace-separated list such as `"16, 32, 64"`.
///
/// For front ends that collect sizes as one line of text; the CLI gets its
/// sizes from clap directly.
pub fn parse_sizes(input: &str) -> Result<Vec<u32>> {
    let sizes = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    PixelizeError::InvalidParameter(format!(
                        "Invalid pixelation size '{}': expected a positive integer",
                        s
                    ))
                })
        })
        .collect::<Result<Vec<u32>>>()?;

    if sizes.is_empty() {
        return Err(PixelizeError::InvalidParameter(
            "At least one pixelation size must be specified".to_string(),
        ));
    }

    Ok(sizes)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
