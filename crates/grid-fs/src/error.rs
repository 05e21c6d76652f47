//! Error types for grid-fs

use std::path::PathBuf;

/// Result type for grid-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grid-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The kind of the underlying I/O error, if this error wraps one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Whether the OS refused access to the file.
    ///
    /// On Windows a file held open by another process surfaces as a sharing
    /// violation rather than `PermissionDenied`; both count here.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Io { source, .. } => is_permission_error(source),
            Self::LockFailed { .. } => true,
            _ => false,
        }
    }
}

/// Permission-class check for a raw I/O error.
pub fn is_permission_error(err: &std::io::Error) -> bool {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        return true;
    }
    // ERROR_SHARING_VIOLATION (32) and ERROR_LOCK_VIOLATION (33)
    cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33))
}
