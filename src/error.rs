use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Failed to read settings file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid JPEG quality: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid thumbnail size: {0}x{1}. Both dimensions must be positive")]
    InvalidThumbnailSize(u32, u32),

    #[error("Input directory not found: {0}")]
    InputDirectoryMissing(PathBuf),

    #[error("Input directory contains no files: {0}")]
    InputDirectoryEmpty(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
