//! The on-disk configuration file

use grid_fs::{GridPath, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::sync::SyncPaths;
use crate::{Error, Result};

/// Where the Steam install and the custom images live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Steam ID3, i.e. the account folder name under `userdata`
    #[serde(default)]
    pub account_id: String,

    /// Steam installation folder
    #[serde(default)]
    pub steam_folder: String,

    /// Custom grid image folder
    #[serde(default)]
    pub source_dir: String,
}

/// Optional replacements for derived paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides {
    /// Destination grid folder; empty means derive it from the settings
    #[serde(default)]
    pub grid_dir: String,
}

/// Contents of `gridsync.toml` (or its JSON/YAML equivalent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub overrides: Overrides,
}

impl GridConfig {
    /// Starter configuration written by `config --init`.
    pub fn template() -> Self {
        let steam_folder = if cfg!(windows) {
            "C:/Program Files (x86)/Steam"
        } else if cfg!(target_os = "macos") {
            "~/Library/Application Support/Steam"
        } else {
            "~/.local/share/Steam"
        };

        Self {
            settings: Settings {
                account_id: String::new(),
                steam_folder: steam_folder.to_string(),
                source_dir: String::new(),
            },
            overrides: Overrides::default(),
        }
    }

    /// Destination grid folder: the override when set, otherwise
    /// `{steam_folder}/userdata/{account_id}/config/grid`.
    pub fn destination_root(&self) -> Result<NormalizedPath> {
        let grid_dir = self.overrides.grid_dir.trim();
        if !grid_dir.is_empty() {
            return Ok(expand_home(grid_dir));
        }

        let steam_folder = required("settings.steam_folder", &self.settings.steam_folder)?;
        let account_id = required("settings.account_id", &self.settings.account_id)?;
        Ok(expand_home(steam_folder)
            .join(GridPath::UserData.as_str())
            .join(account_id)
            .join(GridPath::AccountGrid.as_str()))
    }

    pub fn source_dir(&self) -> Result<NormalizedPath> {
        required("settings.source_dir", &self.settings.source_dir).map(expand_home)
    }

    /// Resolve both directories of a sync run.
    pub fn sync_paths(&self) -> Result<SyncPaths> {
        Ok(SyncPaths {
            source_dir: self.source_dir()?,
            destination_root: self.destination_root()?,
        })
    }
}

fn required<'a>(key: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::ConfigInvalid {
            message: format!("`{key}` is not set"),
        })
    } else {
        Ok(value)
    }
}

/// Replace a leading `~` with the home directory.
fn expand_home(value: &str) -> NormalizedPath {
    let rest = match value.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return NormalizedPath::new(value),
    };
    match dirs::home_dir() {
        Some(home) => NormalizedPath::new(format!("{}{}", NormalizedPath::new(home), rest)),
        None => NormalizedPath::new(value),
    }
}
