//! Error types for the project layer.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration errors. A run that fails with one of these produces
/// no model.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Nothing to parse.
    #[error("No input files")]
    NoSources,

    /// An input path does not exist.
    #[error("Input path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// An input file exists but cannot be read as UTF-8 text.
    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cache I/O failures. Logged and counted, never propagated out of a run.
#[derive(Debug, Error)]
pub enum CacheError {
    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
