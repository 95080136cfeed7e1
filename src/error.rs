//! Error types for the collation engine
//!
//! Only loading and construction can fail. Compositing itself never errors:
//! out-of-range stamps are clipped and degenerate regions are no-ops.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for library operations.
#[derive(Debug, Error)]
pub enum CollateError {
    #[error("failed to decode image {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("failed to encode image {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    #[error("raster buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("scale factor must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("glyph key {key:?} in style {style:?} is not a single character")]
    InvalidGlyphKey { style: String, key: String },

    #[error("unknown display mode: {0}")]
    UnknownDisplayMode(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollateError>;
