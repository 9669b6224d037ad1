//! Error types for palette loading and validation.
//!
//! The numeric core (interpolation, sorting, packing) is total and never
//! returns these; they surface only at the edges where palettes are parsed,
//! read from disk, or checked against their configured ranges.

use thiserror::Error;

/// Result type alias using PaletteError.
pub type PaletteResult<T> = Result<T, PaletteError>;

/// Primary error type for palette operations.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Failed to parse palette document: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl PaletteError {
    /// Shorthand for an out-of-range configuration value.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        PaletteError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by the document content rather than the environment.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, PaletteError::Io(_))
    }
}

impl From<std::io::Error> for PaletteError {
    fn from(err: std::io::Error) -> Self {
        PaletteError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PaletteError {
    fn from(err: serde_json::Error) -> Self {
        PaletteError::Parse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for PaletteError {
    fn from(err: serde_yaml::Error) -> Self {
        PaletteError::Parse(format!("YAML error: {}", err))
    }
}
