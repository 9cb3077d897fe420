//! Error types for FLAC metadata access.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, parsing or saving a FLAC file.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The target path does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but is not a parseable FLAC stream.
    #[error("invalid FLAC file {}: {reason}", .path.display())]
    InvalidContainer { path: PathBuf, reason: String },

    /// An I/O error while opening the file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other failure reported by `lofty`, including save failures.
    #[error("tag library error on {}: {source}", .path.display())]
    Lofty {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// The edit set had nothing to apply.
    #[error("no valid metadata to update")]
    EmptyEdits,
}

impl AccessError {
    /// Returns `true` when the error means the file is not a FLAC stream.
    pub fn is_invalid_container(&self) -> bool {
        matches!(self, Self::InvalidContainer { .. })
    }

    /// Returns `true` when the target path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience alias for accessor results.
pub type AccessResult<T> = std::result::Result<T, AccessError>;
