use thiserror::Error;

/// Main error type for the era-camera library
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised inside the capture pipeline itself.
///
/// All pipeline errors are terminal for the capture attempt: a failed capture
/// produces no artifact and nothing is persisted.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No source frame available: {reason}")]
    MissingSource { reason: String },

    #[error("Frame has zero area ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("Image encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Unknown era: {id}")]
    UnknownEra { id: String },
}

/// Gallery-store errors
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Photo not found in gallery: {id}")]
    NotFound { id: String },

    #[error("Failed to persist gallery index: {reason}")]
    PersistFailed { reason: String },

    #[error("Failed to load gallery index: {reason}")]
    LoadFailed { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CaptureError
pub type Result<T> = std::result::Result<T, CaptureError>;

impl CaptureError {
    /// Get a user-friendly error message suitable for surfacing in a UI toast
    pub fn user_message(&self) -> String {
        match self {
            Self::Pipeline(PipelineError::MissingSource { .. }) => {
                "No frame was captured. Check that the source is available and try again.".to_string()
            }
            Self::Pipeline(PipelineError::EmptyFrame { .. }) => {
                "The captured frame was empty, so no photo was produced.".to_string()
            }
            Self::Pipeline(PipelineError::UnknownEra { id }) => {
                format!("Era '{}' is not in the catalog. Use --list-eras to see what's available.", id)
            }
            Self::Gallery(GalleryError::NotFound { id }) => {
                format!("No photo with id '{}' exists in the gallery.", id)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_converts_to_capture_error() {
        let err: CaptureError = PipelineError::EmptyFrame { width: 0, height: 0 }.into();
        assert!(matches!(
            err,
            CaptureError::Pipeline(PipelineError::EmptyFrame { .. })
        ));
    }

    #[test]
    fn test_user_message_for_unknown_era() {
        let err: CaptureError = PipelineError::UnknownEra { id: "betamax".to_string() }.into();
        assert!(err.user_message().contains("betamax"));
    }
}
