use thiserror::Error;

/// Main error type for the chroma-compositor library
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Image loading error: {0}")]
    Load(#[from] LoadError),

    #[error("Keying error: {0}")]
    Keying(#[from] KeyingError),

    #[error("Vision primitive error: {0}")]
    Vision(#[from] VisionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write image: {path} - {reason}")]
    Save { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised while reading input images
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Image file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to decode image: {path} - {reason}")]
    DecodeFailed { path: String, reason: String },

    #[error("Image has no pixels: {path}")]
    EmptyImage { path: String },
}

/// Errors raised by the chroma-key core
#[derive(Error, Debug)]
pub enum KeyingError {
    #[error("Foreground image has no pixels")]
    EmptyForeground,

    #[error("Background image has no pixels")]
    EmptyBackground,
}

/// Errors raised by the vision-library seams
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Smoothing sigma must be positive, got {sigma}")]
    InvalidSigma { sigma: f32 },

    #[error("Edge thresholds must satisfy 0 <= low < high, got {low}..{high}")]
    InvalidEdgeThresholds { low: f32, high: f32 },

    #[error("Descriptor extraction failed: {reason}")]
    DescriptorFailed { reason: String },
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

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

impl CompositorError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // A missing input might appear on retry
            Self::Load(LoadError::NotFound { .. }) => true,
            Self::Save { .. } => true,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(LoadError::NotFound { path }) => {
                format!(
                    "Could not find image '{}'. Please check the path and try again.",
                    path
                )
            }
            Self::Load(LoadError::DecodeFailed { path, .. }) => {
                format!(
                    "Could not decode image '{}'. Please check the file is a valid PNG or JPEG.",
                    path
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
