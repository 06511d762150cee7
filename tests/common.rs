use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::fs;
use std::path::{Path, PathBuf};

/// A gradient image; enough detail that JPEG encoding behaves like it
/// does on photos instead of collapsing to a flat block.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

pub fn jpeg_bytes_with_quality(quality: u8) -> Vec<u8> {
    let rgb = gradient_image(160, 120).to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&rgb).unwrap();
    buf
}

pub fn write_jpeg_with_quality(path: &Path, quality: u8) {
    fs::write(path, jpeg_bytes_with_quality(quality)).unwrap();
}

pub fn write_png(path: &Path) {
    gradient_image(160, 120)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

pub fn write_corrupt_file(path: &Path) {
    fs::write(path, b"this is certainly not an image").unwrap();
}

/// Write a settings file with the standard directory names, returning
/// its path. Directories are relative to `root`.
pub fn write_config(root: &Path, jpeg_quality: u8, thumb_width: u32, thumb_height: u32) -> PathBuf {
    let config_path = root.join("config.json");
    let json = format!(
        r#"{{
    "InputDirectory": "images",
    "EditedDirectory": "edited",
    "NotEditedDirectory": "not-edited",
    "ThumbnailDirectory": "thumbnails",
    "JpegQuality": {},
    "ThumbnailWidth": {},
    "ThumbnailHeight": {}
}}"#,
        jpeg_quality, thumb_width, thumb_height
    );
    fs::write(&config_path, json).unwrap();
    config_path
}
