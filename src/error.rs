//! Error types for the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by persistence, asset handling and audio.
///
/// None of these stop the frame loop: the front end logs them, shows a
/// message where one makes sense, and keeps the previous state.
#[derive(Error, Debug)]
pub enum FlapperError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON document could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored asset reference is not a usable `data:` URI.
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// An image asset could not be decoded.
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    /// The audio device or a clip failed.
    #[error("audio error: {0}")]
    Audio(String),

    /// The platform gave no per-user config directory.
    #[error("could not determine config directory")]
    NoConfigDir,
}

impl FlapperError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<FlapperError> for io::Error {
    fn from(err: FlapperError) -> Self {
        match err {
            FlapperError::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

/// Result type for crate operations.
pub type Result<T> = std::result::Result<T, FlapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = FlapperError::io(
            "/tmp/missing.png",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.png"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_converts_back_to_io_error() {
        let err: io::Error = FlapperError::NoConfigDir.into();
        assert_eq!(err.kind(), io::ErrorKind::Other);

        let inner = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: io::Error = FlapperError::io("x", inner).into();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
