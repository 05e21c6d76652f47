//! Error types for grid-core
//!
//! Only run-level failures live here. Per-artifact problems are never
//! errors; they become a [`SyncOutcome`](crate::SyncOutcome).

use std::path::PathBuf;

/// Result type for grid-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grid-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The destination grid directory does not exist; nothing can be placed
    #[error("Steam grid directory does not exist: {path}")]
    DestinationRootMissing { path: PathBuf },

    /// The custom grid image directory does not exist
    #[error("Custom grid image directory does not exist: {path}")]
    SourceDirMissing { path: PathBuf },

    /// No configuration file could be found
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration is present but incomplete or contradictory
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// A store page URL could not be turned into a source filename
    #[error("Invalid store URL '{url}': {reason}")]
    InvalidStoreUrl { url: String, reason: String },

    /// Importing would overwrite an existing source image
    #[error("Source image already exists: {path}")]
    ImportTargetExists { path: PathBuf },

    /// Filesystem error from grid-fs
    #[error(transparent)]
    Fs(#[from] grid_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
