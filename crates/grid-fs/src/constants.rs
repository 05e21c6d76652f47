//! Well-known names in the Steam grid layout.

use std::path::Path;

/// Fixed path components used when locating and maintaining grid folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPath {
    /// Backup directory under the destination root
    Originals,
    /// Per-account directory under the Steam folder
    UserData,
    /// Grid directory under an account (`config/grid`)
    AccountGrid,
    /// Config file looked up in the working directory
    LocalConfigFile,
    /// Application directory under the platform config directory
    AppConfigDir,
}

impl GridPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Originals => "originals",
            Self::UserData => "userdata",
            Self::AccountGrid => "config/grid",
            Self::LocalConfigFile => "gridsync.toml",
            Self::AppConfigDir => "gridsync",
        }
    }
}

impl AsRef<Path> for GridPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for GridPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for GridPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
