//! SHA-256 content digests
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used to decide
//! whether two artifacts carry the same bytes, independent of name or mtime.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

const CHUNK_SIZE: usize = 64 * 1024;

/// Digest of a file's content, or `Absent` when the file does not exist.
///
/// `Absent` never compares equal to anything, not even another `Absent`:
/// two missing files are not "identical content". For that reason the type
/// implements `PartialEq` but not `Eq`.
#[derive(Debug, Clone)]
pub enum ContentDigest {
    /// Checksum in canonical `sha256:<hex>` form
    Present(String),
    /// No file at the hashed path
    Absent,
}

impl ContentDigest {
    /// Hash the file at `path`.
    ///
    /// A missing file yields `Absent`. Any other I/O failure (permission
    /// denied, path is a directory) is returned as an error.
    pub fn of_file(path: &Path) -> io::Result<Self> {
        match compute_file_checksum(path) {
            Ok(checksum) => Ok(Self::Present(checksum)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::Absent),
            Err(e) => Err(e),
        }
    }

    /// Whether a file existed at the hashed path.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The checksum string, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present(s) => Some(s),
            Self::Absent => None,
        }
    }
}

impl PartialEq for ContentDigest {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Present(a), Self::Present(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(s) => f.write_str(s),
            Self::Absent => f.write_str("<absent>"),
        }
    }
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// The file is streamed in fixed-size chunks. Returns a string in the
/// canonical format `"sha256:<hex>"`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_checksum(path: &Path) -> io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_checksum_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        std::fs::write(&path, "hello world").unwrap();

        assert_eq!(
            compute_file_checksum(&path).unwrap(),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn file_checksum_spans_multiple_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        let content: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &content).unwrap();

        assert_eq!(
            compute_file_checksum(&path).unwrap(),
            format!("sha256:{:x}", Sha256::digest(&content))
        );
    }

    #[test]
    fn identical_bytes_under_different_names_match() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("Hitman 3_grid_1659040.jpg");
        let b = dir.path().join("1659040p.jpg");
        std::fs::write(&a, b"same bytes").unwrap();
        std::fs::write(&b, b"same bytes").unwrap();

        assert_eq!(
            ContentDigest::of_file(&a).unwrap(),
            ContentDigest::of_file(&b).unwrap()
        );
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let digest = ContentDigest::of_file(&dir.path().join("nope.png")).unwrap();
        assert!(!digest.is_present());
        assert_eq!(digest.as_str(), None);
    }

    #[test]
    fn absent_never_equals_absent() {
        assert_ne!(ContentDigest::Absent, ContentDigest::Absent);
        assert_ne!(
            ContentDigest::Absent,
            ContentDigest::Present(format!("sha256:{:x}", Sha256::digest(b"")))
        );
    }

    #[test]
    fn directory_is_an_error_not_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ContentDigest::of_file(dir.path()).is_err());
    }
}
