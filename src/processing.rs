//! Per-file classification and transformation.
//!
//! One input file yields at most two outputs: the full-size image
//! (recompressed into `edited/`, or copied verbatim into `not-edited/`
//! when it is a JPEG already at or below the target quality) and a
//! center-cropped thumbnail in `thumbnails/`. Files whose format cannot
//! be identified produce no outputs and are reported as unrecognized.

use crate::config::{Config, OutputLayout};
use crate::constants::{OUTPUT_EXTENSION, THUMBNAIL_SUFFIX};
use crate::error::{OptimizeError, Result};
use crate::quality;
use crate::report::{Outcome, ProcessingResult};
use crate::verbose;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    pub jpeg_quality: u8,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

impl From<&Config> for ProcessOptions {
    fn from(config: &Config) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
            thumbnail_width: config.thumbnail_width,
            thumbnail_height: config.thumbnail_height,
        }
    }
}

/// Removes the outputs written for one input if its processing fails
/// partway, so a file's outputs are all-or-nothing.
struct OutputGuard {
    written: Vec<PathBuf>,
    disarmed: bool,
}

impl OutputGuard {
    fn new() -> Self {
        Self {
            written: Vec::new(),
            disarmed: false,
        }
    }

    fn record(&mut self, path: &Path) {
        self.written.push(path.to_path_buf());
    }

    fn disarm(&mut self) {
        self.disarmed = true;
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if !self.disarmed {
            for path in &self.written {
                let _ = fs::remove_file(path);
            }
        }
    }
}

/// Classify and transform a single input file.
///
/// Unknown container formats are a normal result (`Outcome::Unrecognized`),
/// not an error; any other failure propagates to the caller, which logs
/// it and moves on to the next file.
pub fn process_file(
    input: &Path,
    layout: &OutputLayout,
    options: &ProcessOptions,
) -> Result<ProcessingResult> {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| OptimizeError::InvalidFileName(input.to_path_buf()))?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| OptimizeError::InvalidFileName(input.to_path_buf()))?;

    let data = fs::read(input)?;
    let original_size = data.len() as u64;

    let format = match image::guess_format(&data) {
        Ok(format) => format,
        Err(_) => {
            verbose!("{}: format not recognized", file_name);
            return Ok(ProcessingResult {
                file_name,
                original_size,
                outcome: Outcome::Unrecognized,
            });
        }
    };

    let img = image::load_from_memory_with_format(&data, format)?;

    let mut guard = OutputGuard::new();

    let outcome = if already_compressed(format, &data, options.jpeg_quality) {
        let dest = layout.not_edited.join(&file_name);
        fs::write(&dest, &data)?;
        guard.record(&dest);
        verbose!("{}: already at target quality, copied", file_name);
        Outcome::Skipped
    } else {
        let dest = layout
            .edited
            .join(format!("{}.{}", stem, OUTPUT_EXTENSION));
        let new_size = write_jpeg(&img, &dest, options.jpeg_quality)?;
        guard.record(&dest);
        verbose!(
            "{}: recompressed {} -> {} bytes",
            file_name,
            original_size,
            new_size
        );
        Outcome::Recompressed { new_size }
    };

    // Thumbnail from the original decoded pixels, whatever the outcome.
    let thumbnail = img.resize_to_fill(
        options.thumbnail_width,
        options.thumbnail_height,
        FilterType::Lanczos3,
    );
    let thumbnail_dest = layout
        .thumbnails
        .join(format!("{}{}.{}", stem, THUMBNAIL_SUFFIX, OUTPUT_EXTENSION));
    write_jpeg(&thumbnail, &thumbnail_dest, options.jpeg_quality)?;

    guard.disarm();
    Ok(ProcessingResult {
        file_name,
        original_size,
        outcome,
    })
}

/// The skip rule: JPEG sources whose embedded quality is at or below the
/// target need no re-encoding. Missing quality metadata means recompress.
fn already_compressed(format: ImageFormat, data: &[u8], target_quality: u8) -> bool {
    format == ImageFormat::Jpeg
        && quality::estimate_quality(data).map_or(false, |q| q <= target_quality)
}

/// Encode as JPEG at the given quality, returning the encoded byte size.
fn write_jpeg(img: &DynamicImage, dest: &Path, quality: u8) -> Result<u64> {
    // JPEG has no alpha channel; flatten whatever the decoder produced.
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&rgb)?;
    fs::write(dest, &buf)?;
    Ok(buf.len() as u64)
}
