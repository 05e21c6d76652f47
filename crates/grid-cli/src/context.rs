//! Run context
//!
//! Collects the global flags that decide which configuration a command runs
//! against, and resolves them on demand. Commands that do not need both
//! folders (`config --init`, `completions`) never trigger resolution.

use std::path::{Path, PathBuf};

use grid_core::{ConfigResolver, PathOverrides, ReconciliationEngine, ResolvedConfig};
use grid_fs::NormalizedPath;

use crate::error::Result;

/// Inputs shared by every command.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory searched for `gridsync.toml`
    pub working_dir: PathBuf,
    /// `--config` / `GRIDSYNC_CONFIG`
    pub config_path: Option<PathBuf>,
    pub overrides: PathOverrides,
    /// Whether prompts may be shown
    pub interactive: bool,
}

impl RunContext {
    pub fn new(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: None,
            overrides: PathOverrides::default(),
            interactive: false,
        }
    }

    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new(NormalizedPath::new(&self.working_dir))
            .with_explicit_path(self.config_path.clone())
    }

    /// Resolve configuration and flags into the folders of a run.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let resolved = self.resolver().resolve(&self.overrides)?;
        tracing::debug!(
            config = ?resolved.config_path.as_ref().map(|p| p.as_str()),
            source_dir = %resolved.paths.source_dir,
            destination_root = %resolved.paths.destination_root,
            "Resolved configuration"
        );
        Ok(resolved)
    }

    pub fn engine(&self) -> Result<ReconciliationEngine> {
        Ok(ReconciliationEngine::new(self.resolve()?.paths))
    }
}
