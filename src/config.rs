use crate::constants::{MAX_QUALITY, MIN_QUALITY};
use crate::error::{OptimizeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Run settings, read once at startup from a JSON file.
///
/// The field names mirror the keys of the settings file
/// (`InputDirectory`, `JpegQuality`, ...). All directory values are
/// interpreted relative to the project root, which is the directory
/// containing the settings file itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Directory scanned for candidate files
    pub input_directory: String,
    /// Destination for recompressed images
    pub edited_directory: String,
    /// Destination for verbatim copies of already-compressed JPEGs
    pub not_edited_directory: String,
    /// Destination for generated thumbnails
    pub thumbnail_directory: String,
    /// Target JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Thumbnail width in pixels
    pub thumbnail_width: u32,
    /// Thumbnail height in pixels
    pub thumbnail_height: u32,
}

impl Config {
    /// Load and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| OptimizeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|source| OptimizeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate numeric parameters.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.jpeg_quality) {
            return Err(OptimizeError::InvalidQuality(self.jpeg_quality));
        }

        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(OptimizeError::InvalidThumbnailSize(
                self.thumbnail_width,
                self.thumbnail_height,
            ));
        }

        Ok(())
    }
}

/// Directory paths for one run, resolved against the project root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub input: PathBuf,
    pub edited: PathBuf,
    pub not_edited: PathBuf,
    pub thumbnails: PathBuf,
}

impl OutputLayout {
    pub fn resolve(config: &Config, root: &Path) -> Self {
        Self {
            input: root.join(&config.input_directory),
            edited: root.join(&config.edited_directory),
            not_edited: root.join(&config.not_edited_directory),
            thumbnails: root.join(&config.thumbnail_directory),
        }
    }

    /// Create the three output directories, create-if-absent.
    ///
    /// Called once before any file is processed; the input directory is
    /// deliberately not created here, a missing input is a setup error.
    pub fn create_output_dirs(&self) -> Result<()> {
        for dir in [&self.edited, &self.not_edited, &self.thumbnails] {
            fs::create_dir_all(dir)
                .map_err(|_| OptimizeError::DirectoryCreationFailed(dir.clone()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_config() -> Config {
        Config {
            input_directory: "images".to_string(),
            edited_directory: "edited".to_string(),
            not_edited_directory: "not-edited".to_string(),
            thumbnail_directory: "thumbnails".to_string(),
            jpeg_quality: 80,
            thumbnail_width: 200,
            thumbnail_height: 150,
        }
    }

    #[test]
    fn test_parse_settings_keys() {
        let json = r#"{
            "InputDirectory": "images",
            "EditedDirectory": "edited",
            "NotEditedDirectory": "not-edited",
            "ThumbnailDirectory": "thumbnails",
            "JpegQuality": 85,
            "ThumbnailWidth": 320,
            "ThumbnailHeight": 240
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.input_directory, "images");
        assert_eq!(config.not_edited_directory, "not-edited");
        assert_eq!(config.jpeg_quality, 85);
        assert_eq!(config.thumbnail_width, 320);
        assert_eq!(config.thumbnail_height, 240);
    }

    #[test]
    fn test_parse_missing_field() {
        let json = r#"{ "InputDirectory": "images" }"#;
        let result: std::result::Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_quality_bounds() {
        let mut config = sample_config();
        assert!(config.validate().is_ok());

        config.jpeg_quality = 0;
        assert!(matches!(
            config.validate(),
            Err(OptimizeError::InvalidQuality(0))
        ));

        config.jpeg_quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_thumbnail_size() {
        let mut config = sample_config();
        config.thumbnail_width = 0;
        assert!(matches!(
            config.validate(),
            Err(OptimizeError::InvalidThumbnailSize(0, 150))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(OptimizeError::ConfigRead { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(b"not json at all").unwrap();

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(OptimizeError::ConfigParse { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_quality() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "InputDirectory": "images",
            "EditedDirectory": "edited",
            "NotEditedDirectory": "not-edited",
            "ThumbnailDirectory": "thumbnails",
            "JpegQuality": 0,
            "ThumbnailWidth": 320,
            "ThumbnailHeight": 240
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(OptimizeError::InvalidQuality(0))));
    }

    #[test]
    fn test_layout_resolves_against_root() {
        let config = sample_config();
        let layout = OutputLayout::resolve(&config, Path::new("/project"));

        assert_eq!(layout.input, PathBuf::from("/project/images"));
        assert_eq!(layout.edited, PathBuf::from("/project/edited"));
        assert_eq!(layout.not_edited, PathBuf::from("/project/not-edited"));
        assert_eq!(layout.thumbnails, PathBuf::from("/project/thumbnails"));
    }

    #[test]
    fn test_create_output_dirs_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = sample_config();
        let layout = OutputLayout::resolve(&config, temp_dir.path());

        layout.create_output_dirs().unwrap();
        layout.create_output_dirs().unwrap();

        assert!(layout.edited.is_dir());
        assert!(layout.not_edited.is_dir());
        assert!(layout.thumbnails.is_dir());
    }
}
