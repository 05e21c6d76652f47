//! Locating and resolving the configuration file
//!
//! The file is looked up in a fixed order; the first one that exists wins:
//! 1. An explicit path (`--config` / `GRIDSYNC_CONFIG`)
//! 2. `gridsync.toml` in the working directory
//! 3. `<config_dir>/gridsync/config.toml`
//!
//! Command-line path flags are then applied on top of the loaded file.

use std::path::PathBuf;

use grid_fs::{ConfigStore, GridPath, NormalizedPath};

use super::settings::GridConfig;
use crate::sync::SyncPaths;
use crate::{Error, Result};

/// Directory flags that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub source_dir: Option<PathBuf>,
    pub grid_dir: Option<PathBuf>,
}

/// Effective configuration for a run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File the configuration came from, if any
    pub config_path: Option<NormalizedPath>,
    /// File contents with overrides applied
    pub config: GridConfig,
    pub paths: SyncPaths,
}

/// Finds, loads and resolves the configuration.
pub struct ConfigResolver {
    working_dir: NormalizedPath,
    explicit_path: Option<PathBuf>,
    /// Replaces `dirs::config_dir()` lookups; used by tests.
    app_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(working_dir: NormalizedPath) -> Self {
        Self {
            working_dir,
            explicit_path: None,
            app_config_dir_override: None,
        }
    }

    /// Use `path` instead of searching. A missing file is then an error.
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    pub fn with_app_config_dir(mut self, dir: PathBuf) -> Self {
        self.app_config_dir_override = Some(dir);
        self
    }

    fn app_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.app_config_dir_override {
            return Some(dir.clone());
        }
        dirs::config_dir().map(|d| d.join(GridPath::AppConfigDir.as_str()))
    }

    /// Per-user config file, where `config --init` writes by default.
    pub fn user_config_path(&self) -> Option<NormalizedPath> {
        self.app_config_dir()
            .map(|dir| NormalizedPath::new(dir.join("config.toml")))
    }

    /// Config file in the working directory.
    pub fn local_config_path(&self) -> NormalizedPath {
        self.working_dir.join(GridPath::LocalConfigFile.as_str())
    }

    /// Files searched when no explicit path is given, in order.
    pub fn candidates(&self) -> Vec<NormalizedPath> {
        let mut candidates = vec![self.local_config_path()];
        candidates.extend(self.user_config_path());
        candidates
    }

    /// The config file to use, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] when an explicit path does not exist.
    pub fn locate(&self) -> Result<Option<NormalizedPath>> {
        if let Some(ref explicit) = self.explicit_path {
            let path = NormalizedPath::new(explicit);
            if !path.is_file() {
                return Err(Error::ConfigNotFound {
                    path: explicit.clone(),
                });
            }
            return Ok(Some(path));
        }

        Ok(self.candidates().into_iter().find(|p| {
            let found = p.is_file();
            tracing::debug!(path = %p, found, "Config candidate");
            found
        }))
    }

    /// Load the config file, or an empty configuration if there is none.
    pub fn load(&self) -> Result<(Option<NormalizedPath>, GridConfig)> {
        let Some(path) = self.locate()? else {
            return Ok((None, GridConfig::default()));
        };
        let config = ConfigStore::new().load(&path)?;
        tracing::debug!(path = %path, "Loaded config");
        Ok((Some(path), config))
    }

    /// Load the file, apply `overrides` and resolve [`SyncPaths`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] when no file exists and the flags do
    /// not cover both directories, and [`Error::ConfigInvalid`] when a file
    /// exists but lacks a required key.
    pub fn resolve(&self, overrides: &PathOverrides) -> Result<ResolvedConfig> {
        let (config_path, mut config) = self.load()?;

        if let Some(ref dir) = overrides.source_dir {
            config.settings.source_dir = NormalizedPath::new(dir).to_string();
        }
        if let Some(ref dir) = overrides.grid_dir {
            config.overrides.grid_dir = NormalizedPath::new(dir).to_string();
        }

        let paths = match (config.sync_paths(), &config_path) {
            (Ok(paths), _) => paths,
            (Err(_), None) => {
                return Err(Error::ConfigNotFound {
                    path: self.local_config_path().to_native(),
                });
            }
            (Err(e), Some(_)) => return Err(e),
        };

        Ok(ResolvedConfig {
            config_path,
            config,
            paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver(temp: &TempDir) -> ConfigResolver {
        ConfigResolver::new(NormalizedPath::new(temp.path().join("cwd")))
            .with_app_config_dir(temp.path().join("appdata"))
    }

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn nothing_found_without_files() {
        let temp = TempDir::new().unwrap();
        assert_eq!(resolver(&temp).locate().unwrap(), None);
    }

    #[test]
    fn local_file_wins_over_user_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path().join("cwd/gridsync.toml"), "");
        write(temp.path().join("appdata/config.toml"), "");

        let found = resolver(&temp).locate().unwrap().unwrap();
        assert!(found.as_str().ends_with("cwd/gridsync.toml"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = resolver(&temp)
            .with_explicit_path(Some(temp.path().join("nope.toml")))
            .locate()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn flags_alone_are_enough() {
        let temp = TempDir::new().unwrap();
        let overrides = PathOverrides {
            source_dir: Some(PathBuf::from("/pics")),
            grid_dir: Some(PathBuf::from("/grid")),
        };
        let resolved = resolver(&temp).resolve(&overrides).unwrap();
        assert_eq!(resolved.config_path, None);
        assert_eq!(resolved.paths.source_dir.as_str(), "/pics");
        assert_eq!(resolved.paths.destination_root.as_str(), "/grid");
    }

    #[test]
    fn incomplete_flags_without_file_report_not_found() {
        let temp = TempDir::new().unwrap();
        let overrides = PathOverrides {
            source_dir: Some(PathBuf::from("/pics")),
            grid_dir: None,
        };
        let err = resolver(&temp).resolve(&overrides).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
