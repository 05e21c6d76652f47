//! Source directory listing

use std::fs;
use std::io;
use std::path::PathBuf;

use grid_fs::NormalizedPath;

use super::outcome::RejectedEntry;
use crate::artifact::ArtifactDescriptor;
use crate::{Error, Result};

/// Descriptors found in the custom grid folder, plus the files whose names
/// could not be parsed.
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub descriptors: Vec<ArtifactDescriptor>,
    pub rejected: Vec<RejectedEntry>,
}

impl SourceScan {
    /// List the flat `source_dir`. Subdirectories are not traversed.
    ///
    /// Entries are sorted by file name so runs are deterministic.
    pub fn scan_dir(source_dir: &NormalizedPath) -> Result<Self> {
        let entries = fs::read_dir(source_dir.as_ref()).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::SourceDirMissing {
                path: source_dir.to_native(),
            },
            _ => Error::Fs(grid_fs::Error::io(source_dir.to_native(), e)),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let scan = Self::from_paths(paths);
        tracing::debug!(
            source_dir = %source_dir,
            descriptors = scan.descriptors.len(),
            rejected = scan.rejected.len(),
            "Scanned source directory"
        );
        Ok(scan)
    }

    /// Parse an explicit list of paths, keeping their order.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut scan = Self::default();
        for path in paths {
            match ArtifactDescriptor::parse(&path) {
                Ok(descriptor) => scan.descriptors.push(descriptor),
                Err(failure) => {
                    tracing::debug!(path = %path.display(), %failure, "Rejected source file");
                    scan.rejected.push(RejectedEntry {
                        path: NormalizedPath::new(&path),
                        failure,
                    });
                }
            }
        }
        scan
    }
}
