//! [`TestGrid`] fixture for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Account folder name used by every fixture.
pub const ACCOUNT_ID: &str = "12345678";

/// A temporary custom image folder and a fake Steam install whose
/// `userdata/<account>/config/grid` folder already exists.
///
/// # Example
///
/// ```rust,no_run
/// use grid_test_utils::grid::TestGrid;
///
/// let grid = TestGrid::new();
/// grid.write_source("Road 96_grid_1466640.png", b"art");
/// // ... run a sync ...
/// grid.assert_dest_content("1466640p.png", b"art");
/// ```
pub struct TestGrid {
    temp_dir: TempDir,
}

impl Default for TestGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGrid {
    /// Create the source folder and the Steam grid folder.
    pub fn new() -> Self {
        let grid = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(grid.source_dir()).unwrap();
        fs::create_dir_all(grid.grid_dir()).unwrap();
        grid
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Custom grid image folder.
    pub fn source_dir(&self) -> PathBuf {
        self.root().join("custom")
    }

    pub fn steam_folder(&self) -> PathBuf {
        self.root().join("Steam")
    }

    /// `Steam/userdata/<account>/config/grid`.
    pub fn grid_dir(&self) -> PathBuf {
        self.steam_folder()
            .join("userdata")
            .join(ACCOUNT_ID)
            .join("config")
            .join("grid")
    }

    pub fn originals_dir(&self) -> PathBuf {
        self.grid_dir().join("originals")
    }

    /// Delete the Steam grid folder entirely.
    pub fn remove_grid_dir(&self) {
        fs::remove_dir_all(self.grid_dir()).unwrap();
    }

    /// Write a source image; returns its path.
    pub fn write_source(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.source_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a file straight into the Steam grid folder; returns its path.
    pub fn write_dest(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.grid_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a `gridsync.toml` pointing at this fixture; returns its path.
    pub fn write_config(&self) -> PathBuf {
        let path = self.root().join("gridsync.toml");
        let config = format!(
            "[settings]\naccount_id = \"{ACCOUNT_ID}\"\nsteam_folder = \"{}\"\nsource_dir = \"{}\"\n",
            toml_path(&self.steam_folder()),
            toml_path(&self.source_dir()),
        );
        fs::write(&path, config).unwrap();
        path
    }

    /// Names of the regular files in the Steam grid folder, sorted.
    pub fn dest_files(&self) -> Vec<String> {
        list_files(&self.grid_dir())
    }

    /// Names of the backed-up files, sorted.
    pub fn backup_files(&self) -> Vec<String> {
        list_files(&self.originals_dir())
    }

    /// Assert that `name` in the Steam grid folder holds exactly `content`.
    ///
    /// # Panics
    /// Panics if the file is missing or differs.
    pub fn assert_dest_content(&self, name: &str, content: &[u8]) {
        let path = self.grid_dir().join(name);
        let actual = fs::read(&path)
            .unwrap_or_else(|_| panic!("Could not read destination file: {}", path.display()));
        assert!(
            actual == content,
            "Destination {} differs.\nExpected: {:?}\nActual: {:?}",
            path.display(),
            String::from_utf8_lossy(content),
            String::from_utf8_lossy(&actual)
        );
    }

    /// Assert that `name` does **not** exist in the Steam grid folder.
    pub fn assert_dest_missing(&self, name: &str) {
        let path = self.grid_dir().join(name);
        assert!(
            !path.exists(),
            "Expected destination file NOT to exist: {}",
            path.display()
        );
    }

    /// Assert that the backup of `name` holds exactly `content`.
    pub fn assert_backup_content(&self, name: &str, content: &[u8]) {
        let path = self.originals_dir().join(name);
        let actual = fs::read(&path)
            .unwrap_or_else(|_| panic!("Could not read backup: {}", path.display()));
        assert!(
            actual == content,
            "Backup {} differs.\nExpected: {:?}\nActual: {:?}",
            path.display(),
            String::from_utf8_lossy(content),
            String::from_utf8_lossy(&actual)
        );
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Forward-slash path safe to embed in a TOML basic string.
fn toml_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
