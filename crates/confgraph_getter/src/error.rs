//! Error types for module fetching.

use std::path::PathBuf;
use thiserror::Error;

/// Error reported by a download client.
pub type DownloadError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by a [`Getter`](crate::Getter).
#[derive(Debug, Error)]
pub enum GetterError {
    /// The cache directory or the working directory could not be inspected.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The path being inspected.
        path: PathBuf,
        /// The underlying failure.
        source: std::io::Error,
    },

    /// The download client failed.
    #[error("failed to fetch module '{address}': {source}")]
    Download {
        /// The module source reference, verbatim.
        address: String,
        /// The client's error.
        source: DownloadError,
    },
}

impl GetterError {
    /// Creates an [`Io`](Self::Io) error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
