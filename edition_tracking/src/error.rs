//! Error types for edition_tracking

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for edition_tracking operations
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A source directory does not exist
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    /// Oracle catalog could not be loaded
    #[error("Oracle catalog error: {0}")]
    Catalog(#[from] mtg_common::CommonError),
    /// Configuration file could not be parsed
    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TrackingError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrackingError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for edition_tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;
