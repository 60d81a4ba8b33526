//! Error types for letter rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the letter-to-png library.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Background image, gift icon or font file does not exist.
    #[error("Asset not found: {0}")]
    AssetNotFound(PathBuf),

    /// Image or font data could not be decoded.
    #[error("Failed to decode '{path}': {message}")]
    DecodeError { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncodingError(String),

    /// Writing the exported PNG failed.
    #[error("Failed to write '{path}': {message}")]
    ExportError { path: PathBuf, message: String },
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, RenderError>;
