//! Error types shared across HandCue crates.
//!
//! The gesture engine itself never fails: irregular input maps to fallback
//! values. These errors belong to the layers around it (landmark sources,
//! recordings, configuration).

use std::path::PathBuf;

/// Top-level error type for HandCue operations.
#[derive(Debug, thiserror::Error)]
pub enum HandcueError {
    #[error("Landmark source error: {message}")]
    Source { message: String },

    #[error("Recording error: {message}")]
    Recording { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandcueError.
pub type HandcueResult<T> = Result<T, HandcueError>;

impl HandcueError {
    pub fn landmark_source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: msg.into(),
        }
    }
}
