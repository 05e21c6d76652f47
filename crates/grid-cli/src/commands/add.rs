//! Add command implementation
//!
//! Moves a downloaded image into the custom grid folder under the name the
//! sync engine expects.

use std::path::Path;

use colored::Colorize;
use grid_core::naming::{import_artifact, parse_store_url, source_file_name};
use grid_core::ArtifactKind;

use crate::context::RunContext;
use crate::error::{CliError, Result};
use crate::interactive;

/// Arguments of the add command
#[derive(Debug, Clone)]
pub struct AddRequest<'a> {
    pub file: &'a Path,
    pub url: &'a str,
    pub kind: ArtifactKind,
    pub name: Option<&'a str>,
    pub force: bool,
}

/// Run the add command
pub fn run_add(ctx: &RunContext, request: AddRequest<'_>) -> Result<()> {
    if !request.file.is_file() {
        return Err(CliError::user(format!(
            "Image not found: {}",
            request.file.display()
        )));
    }

    let listing = parse_store_url(request.url)?;
    let prompted;
    let fallback = match (request.name, &listing.name) {
        (Some(name), _) => Some(name),
        (None, Some(_)) => None,
        (None, None) if ctx.interactive => {
            prompted = interactive::prompt_game_name()?;
            Some(prompted.as_str())
        }
        (None, None) => {
            return Err(CliError::user(
                "The store URL does not include the game name; pass --name.",
            ));
        }
    };

    let ext = request
        .file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let file_name = source_file_name(request.url, request.kind, &ext, fallback)?;

    let source_dir = ctx.resolve()?.paths.source_dir;
    let target = import_artifact(request.file, &source_dir, &file_name, request.force)?;

    println!(
        "{} Added {}",
        "OK".green().bold(),
        target.file_name().unwrap_or(target.as_str()).cyan()
    );
    println!("Run {} to copy it into Steam.", "gridsync sync".cyan());
    Ok(())
}
