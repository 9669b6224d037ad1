//! Error types for atlas encoding.

use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while turning pixel buffers into image files.
///
/// Rendering itself is infallible; only encoding can fail.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("cannot encode an empty {width}x{height} image")]
    EmptyImage { width: usize, height: usize },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Encode(err.to_string())
    }
}
