//! Atomic I/O operations with file locking
//!
//! Every write into a directory another process may be reading goes through a
//! temp file in the same directory followed by a rename, so readers observe
//! either the old artifact or the new one and never a truncated file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning for atomic writes.
#[derive(Debug, Clone, Copy)]
pub struct RobustnessConfig {
    /// Take an advisory exclusive lock on the temp file while writing
    pub enable_locking: bool,
    /// Flush the temp file to disk before renaming it into place
    pub enable_fsync: bool,
    /// Upper bound for retrying a rename that failed transiently
    pub max_retry_time: Duration,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            enable_locking: true,
            enable_fsync: true,
            max_retry_time: Duration::from_millis(500),
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Creates missing parent directories.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();
    with_temp_file(&native_path, config, |file, temp_path| {
        file.write_all(content).map_err(|e| Error::io(temp_path, e))
    })
}

/// Copy `source` to `dest` atomically.
///
/// The bytes are streamed into a temp file next to `dest` which is then
/// renamed over it, replacing any existing file.
pub fn copy_atomic(source: &Path, dest: &NormalizedPath, config: RobustnessConfig) -> Result<()> {
    let mut reader = File::open(source).map_err(|e| Error::io(source, e))?;
    let native_path = dest.to_native();
    with_temp_file(&native_path, config, |file, _temp_path| {
        io::copy(&mut reader, file).map_err(|e| Error::io(source, e))?;
        Ok(())
    })
}

/// Remove a file; a file that is already gone is not an error.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Whether `a` and `b` name the same file on disk.
///
/// Two spellings of one name on a case-insensitive filesystem are the same
/// file. A path that cannot be opened is never the same as anything.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    same_file::is_same_file(a, b).unwrap_or(false)
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temp file path in the same directory as `target` (same filesystem, so the
/// final rename is atomic). Unique per process and per call.
fn temp_path_for(target: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    target.with_file_name(temp_name)
}

fn with_temp_file<F>(target: &Path, config: RobustnessConfig, fill: F) -> Result<()>
where
    F: FnOnce(&mut File, &Path) -> Result<()>,
{
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_path_for(target);
    let result = write_temp(target, &temp_path, config, fill)
        .and_then(|()| rename_with_retry(&temp_path, target, config));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp<F>(target: &Path, temp_path: &Path, config: RobustnessConfig, fill: F) -> Result<()>
where
    F: FnOnce(&mut File, &Path) -> Result<()>,
{
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    if config.enable_locking {
        FileExt::lock_exclusive(&temp_file).map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;
    }

    fill(&mut temp_file, temp_path)?;

    if config.enable_fsync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(temp_path, e))?;
    }

    if config.enable_locking {
        FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;
    }
    Ok(())
}

/// Errors worth retrying: the consuming application may hold the target open
/// for a moment.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    ) || (cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33)))
}

fn rename_with_retry(from: &Path, to: &Path, config: RobustnessConfig) -> Result<()> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_elapsed_time(Some(config.max_retry_time))
        .build();

    backoff::retry(policy, || {
        fs::rename(from, to).map_err(|e| {
            if is_transient(&e) {
                tracing::debug!(path = %to.display(), error = %e, "Rename failed, retrying");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .map_err(|e| {
        let source = match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        };
        Error::io(to, source)
    })
}
