//! Open command implementation
//!
//! Shows a folder in the platform file browser.

use std::path::Path;
use std::process::Command;

use colored::Colorize;

use crate::cli::Folder;
use crate::context::RunContext;
use crate::error::{CliError, Result};

/// File browser launcher for the current platform.
pub fn file_browser() -> &'static str {
    if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Launch the file browser on `dir` without waiting for it.
pub fn open_folder(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(CliError::user(format!(
            "Folder does not exist: {}",
            dir.display()
        )));
    }

    let browser = file_browser();
    tracing::debug!(browser, dir = %dir.display(), "Opening folder");
    Command::new(browser)
        .arg(dir)
        .spawn()
        .map_err(|e| CliError::user(format!("Failed to launch '{}': {}", browser, e)))?;
    Ok(())
}

/// Run the open command
pub fn run_open(ctx: &RunContext, folder: Folder) -> Result<()> {
    let paths = ctx.resolve()?.paths;
    let dir = match folder {
        Folder::Source => paths.source_dir,
        Folder::Grid => paths.destination_root,
    };

    open_folder(&dir.to_native())?;
    println!("{} Opened {}", "OK".green().bold(), dir.as_str().cyan());
    Ok(())
}
