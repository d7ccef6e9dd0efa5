//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//! The tree model itself never fails: degenerate input yields empty forks.

use thiserror::Error;

/// Errors that can occur while reading a recording
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid recording format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty stack data")]
    EmptyStacks,

    #[error("Flamegraph rendering failed: {0}")]
    RenderFailed(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid SVG content: {0}")]
    InvalidSvg(String),
}

/// Errors that can occur parsing a tree selection path
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid path segment '{0}', expected a branch index")]
    InvalidSegment(String),
}
