//! The `originals` backup directory.

use std::fs;

use grid_fs::{ContentDigest, GridPath, NormalizedPath, RobustnessConfig, io};

use crate::Result;

/// What [`OriginalsStore::back_up`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupAction {
    /// No file existed, so there was nothing to keep
    NothingToBackUp,
    /// A new backup was written
    Created,
    /// An older, different backup with the same name was overwritten
    Replaced,
    /// The backup already held identical bytes
    AlreadyCurrent,
}

/// Manages the backup directory under a destination root.
#[derive(Debug, Clone)]
pub struct OriginalsStore {
    /// `{destination_root}/originals`
    dir: NormalizedPath,
    robustness: RobustnessConfig,
}

impl OriginalsStore {
    /// Create a store for the given destination root. Nothing is created on
    /// disk until the first backup.
    pub fn new(destination_root: &NormalizedPath) -> Self {
        Self::with_robustness(destination_root, RobustnessConfig::default())
    }

    pub fn with_robustness(destination_root: &NormalizedPath, robustness: RobustnessConfig) -> Self {
        Self {
            dir: destination_root.join(GridPath::Originals.as_str()),
            robustness,
        }
    }

    /// The backup directory.
    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }

    /// Where the backup of `file_name` lives.
    pub fn backup_path(&self, file_name: &str) -> NormalizedPath {
        self.dir.join(file_name)
    }

    pub fn has_backup(&self, file_name: &str) -> bool {
        self.backup_path(file_name).is_file()
    }

    /// Copy the file at `existing` into the backup directory.
    ///
    /// Errors keep their I/O kind so callers can tell a permission failure
    /// from other problems.
    pub fn back_up(&self, existing: &NormalizedPath) -> grid_fs::Result<BackupAction> {
        let current = ContentDigest::of_file(existing.as_ref())
            .map_err(|e| grid_fs::Error::io(existing.to_native(), e))?;
        if !current.is_present() {
            return Ok(BackupAction::NothingToBackUp);
        }

        let Some(file_name) = existing.file_name() else {
            return Ok(BackupAction::NothingToBackUp);
        };
        let backup = self.backup_path(file_name);
        let previous = ContentDigest::of_file(backup.as_ref())
            .map_err(|e| grid_fs::Error::io(backup.to_native(), e))?;

        if previous == current {
            tracing::debug!(file = file_name, "Backup already current");
            return Ok(BackupAction::AlreadyCurrent);
        }

        io::copy_atomic(existing.as_ref(), &backup, self.robustness)?;
        tracing::debug!(file = file_name, backup = %backup, "Backed up original");

        Ok(if previous.is_present() {
            BackupAction::Replaced
        } else {
            BackupAction::Created
        })
    }

    /// List backed-up file names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(self.dir.as_ref())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !name.starts_with('.') {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Copy the backup of `file_name` back into `destination_root`.
    ///
    /// Returns `None` when no such backup exists.
    pub fn restore(
        &self,
        file_name: &str,
        destination_root: &NormalizedPath,
    ) -> Result<Option<NormalizedPath>> {
        let backup = self.backup_path(file_name);
        if !backup.is_file() {
            return Ok(None);
        }

        let dest = destination_root.join(file_name);
        io::copy_atomic(backup.as_ref(), &dest, self.robustness)?;
        tracing::info!(file = file_name, "Restored original");
        Ok(Some(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, NormalizedPath, OriginalsStore) {
        let temp = TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        let store = OriginalsStore::new(&root);
        (temp, root, store)
    }

    #[test]
    fn backup_dir_is_under_destination_root() {
        let (_temp, root, store) = setup();
        assert_eq!(store.dir().as_str(), root.join("originals").as_str());
        assert!(!store.dir().exists());
    }

    #[test]
    fn missing_file_needs_no_backup() {
        let (_temp, root, store) = setup();
        let action = store.back_up(&root.join("1466640p.png")).unwrap();
        assert_eq!(action, BackupAction::NothingToBackUp);
        assert!(!store.dir().exists());
    }

    #[test]
    fn first_backup_creates_directory_and_copy() {
        let (temp, root, store) = setup();
        fs::write(temp.path().join("1466640p.png"), b"steam art").unwrap();

        let action = store.back_up(&root.join("1466640p.png")).unwrap();

        assert_eq!(action, BackupAction::Created);
        assert!(store.has_backup("1466640p.png"));
        assert_eq!(
            fs::read(temp.path().join("originals/1466640p.png")).unwrap(),
            b"steam art"
        );
        // The original stays in place
        assert!(temp.path().join("1466640p.png").exists());
    }

    #[test]
    fn identical_backup_is_not_rewritten() {
        let (temp, root, store) = setup();
        fs::write(temp.path().join("1466640p.png"), b"steam art").unwrap();
        store.back_up(&root.join("1466640p.png")).unwrap();

        let action = store.back_up(&root.join("1466640p.png")).unwrap();
        assert_eq!(action, BackupAction::AlreadyCurrent);
    }

    #[test]
    fn different_backup_is_replaced() {
        let (temp, root, store) = setup();
        fs::create_dir_all(temp.path().join("originals")).unwrap();
        fs::write(temp.path().join("originals/1466640p.png"), b"older").unwrap();
        fs::write(temp.path().join("1466640p.png"), b"newer").unwrap();

        let action = store.back_up(&root.join("1466640p.png")).unwrap();

        assert_eq!(action, BackupAction::Replaced);
        assert_eq!(
            fs::read(temp.path().join("originals/1466640p.png")).unwrap(),
            b"newer"
        );
    }

    #[test]
    fn list_and_restore() {
        let (temp, root, store) = setup();
        fs::write(temp.path().join("1659040_hero.jpg"), b"hero").unwrap();
        fs::write(temp.path().join("1659040.jpg"), b"active").unwrap();
        store.back_up(&root.join("1659040_hero.jpg")).unwrap();
        store.back_up(&root.join("1659040.jpg")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["1659040.jpg", "1659040_hero.jpg"]);

        fs::write(temp.path().join("1659040_hero.jpg"), b"custom").unwrap();
        let restored = store.restore("1659040_hero.jpg", &root).unwrap();
        assert!(restored.is_some());
        assert_eq!(fs::read(temp.path().join("1659040_hero.jpg")).unwrap(), b"hero");

        assert!(store.restore("nope.png", &root).unwrap().is_none());
    }
}
