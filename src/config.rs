use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    catalog::EraCatalog,
    error::{ConfigError, Result},
    pipeline::crop::AspectFormat,
};

/// Main configuration for era-camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Capture pipeline settings
    pub capture: CaptureConfig,

    /// Gallery storage settings
    pub gallery: GalleryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            gallery: GalleryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.capture.validate()?;
        Ok(())
    }
}

/// Capture pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// JPEG quality for encoded artifacts (1-100)
    pub jpeg_quality: u8,

    /// Era selected when none is given on the command line
    pub default_era: String,

    /// Aspect format selected when none is given on the command line
    pub default_format: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: crate::pipeline::encoder::JPEG_QUALITY,
            default_era: "modern".to_string(),
            default_format: "square".to_string(),
        }
    }
}

impl CaptureConfig {
    fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "capture.jpeg_quality".to_string(),
                value: self.jpeg_quality.to_string(),
            }
            .into());
        }

        if EraCatalog::new().get(&self.default_era).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "capture.default_era".to_string(),
                value: self.default_era.clone(),
            }
            .into());
        }

        if self.default_format.parse::<AspectFormat>().is_err() {
            return Err(ConfigError::InvalidValue {
                key: "capture.default_format".to_string(),
                value: self.default_format.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Gallery storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory holding the gallery index and photo files
    pub dir: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("gallery") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let original = Config::default();
        original.save_to_file(&file_path).unwrap();
        let loaded = Config::from_file(&file_path).unwrap();

        assert_eq!(original.capture.jpeg_quality, loaded.capture.jpeg_quality);
        assert_eq!(original.capture.default_era, loaded.capture.default_era);
        assert_eq!(original.gallery.dir, loaded.gallery.dir);
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let mut config = Config::default();
        config.capture.jpeg_quality = 0;
        assert!(config.validate().is_err());

        config.capture.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_default_era_rejected() {
        let mut config = Config::default();
        config.capture.default_era = "tintype".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reported() {
        let err = Config::from_file("/nonexistent/era-camera.toml").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
