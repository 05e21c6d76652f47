//! Configuration display and initialization commands

use colored::Colorize;
use grid_core::GridConfig;
use grid_fs::{ConfigStore, NormalizedPath};
use serde::Serialize;

use crate::context::RunContext;
use crate::error::{CliError, Result};

/// What `config --json` prints.
#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    config_path: Option<&'a str>,
    config: &'a GridConfig,
    source_dir: &'a str,
    destination_root: &'a str,
}

/// Display the resolved configuration
pub fn run_config_show(ctx: &RunContext, json: bool) -> Result<()> {
    let resolved = ctx.resolve()?;

    if json {
        let view = ConfigView {
            config_path: resolved.config_path.as_ref().map(|p| p.as_str()),
            config: &resolved.config,
            source_dir: resolved.paths.source_dir.as_str(),
            destination_root: resolved.paths.destination_root.as_str(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let show = |value: &str| {
        if value.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            value.to_string()
        }
    };
    let settings = &resolved.config.settings;

    println!("{}", "gridsync configuration".bold());
    println!();
    match &resolved.config_path {
        Some(path) => println!("  {:<14} {}", "File:".dimmed(), path.as_str().cyan()),
        None => println!("  {:<14} {}", "File:".dimmed(), "(flags only)".dimmed()),
    }
    println!("  {:<14} {}", "Account:".dimmed(), show(&settings.account_id));
    println!("  {:<14} {}", "Steam folder:".dimmed(), show(&settings.steam_folder));
    println!();
    println!(
        "  {:<14} {}",
        "Source:".dimmed(),
        resolved.paths.source_dir.as_str().cyan()
    );
    println!(
        "  {:<14} {}",
        "Steam grid:".dimmed(),
        resolved.paths.destination_root.as_str().cyan()
    );
    if !resolved.paths.destination_root.is_dir() {
        println!(
            "  {} Steam grid folder does not exist; check the account id.",
            "!".yellow()
        );
    }
    Ok(())
}

/// Write a starter configuration file
///
/// Goes to `--config` when given, otherwise `./gridsync.toml`.
pub fn run_config_init(ctx: &RunContext) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => NormalizedPath::new(path),
        None => ctx.resolver().local_config_path(),
    };

    if path.exists() {
        return Err(CliError::user(format!(
            "Configuration already exists: {}",
            path
        )));
    }

    ConfigStore::new().save(&path, &GridConfig::template())?;
    println!("{} Wrote {}", "OK".green().bold(), path.as_str().cyan());
    println!(
        "Set {} and {} before running {}.",
        "account_id".cyan(),
        "source_dir".cyan(),
        "gridsync sync".cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_writes_template_once() {
        let temp = TempDir::new().unwrap();
        let ctx = RunContext::new(temp.path());

        run_config_init(&ctx).unwrap();
        let written: GridConfig = ConfigStore::new()
            .load(&NormalizedPath::new(temp.path().join("gridsync.toml")))
            .unwrap();
        assert_eq!(written, GridConfig::template());

        let err = run_config_init(&ctx).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn init_honours_explicit_yaml_path() {
        let temp = TempDir::new().unwrap();
        let mut ctx = RunContext::new(temp.path());
        ctx.config_path = Some(temp.path().join("grid.yaml"));

        run_config_init(&ctx).unwrap();

        assert!(temp.path().join("grid.yaml").is_file());
        assert!(!temp.path().join("gridsync.toml").exists());
    }
}
