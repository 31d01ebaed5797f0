//! Error types for schema inference and definition emission.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while persisting a rendered definition.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors during sample loading and definition generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Emit(#[from] EmitError),

    // Input errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid role \"{value}\": expected request or response")]
    InvalidRole { value: String },

    #[error("unsupported sample: expected an object or a list of objects, got {actual}")]
    UnsupportedSample { actual: String },

    #[error("empty sample: top-level list has no element to infer from")]
    EmptySample,
}

impl GenerateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::FileNotFound { .. }
            | GenerateError::ReadError { .. }
            | GenerateError::Emit(_) => 3,
            #[cfg(feature = "remote")]
            GenerateError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}
