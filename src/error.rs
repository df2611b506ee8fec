//! Error types for the splitter.
//!
//! `SplitError` is what callers of [`crate::split`] see. `DocumentError`
//! describes why an input document is not a usable feature collection and is
//! carried inside [`SplitError::MalformedInput`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for a split run.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The input path does not point at an existing file.
    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// The input file exists but could not be read.
    #[error("Failed to read {}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input could not be interpreted as a feature collection.
    #[error("Malformed input in {}", .path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// Creating the output directory or writing a layer file failed.
    #[error("Failed to write {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems with an input document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Not valid JSON.
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("top-level value is not a JSON object")]
    NotAnObject,

    #[error("`features` is not an array")]
    FeaturesNotArray,

    #[error("feature at index {index} is not a JSON object")]
    FeatureNotObject { index: usize },
}

/// Result type alias for split operations.
pub type Result<T> = std::result::Result<T, SplitError>;
