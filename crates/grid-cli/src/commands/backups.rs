//! Backup listing and restore commands

use colored::Colorize;

use crate::context::RunContext;
use crate::error::{CliError, Result};

/// List the originals kept in Steam's grid folder
pub fn run_backups(ctx: &RunContext, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let store = engine.originals();
    let names = store.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("{} No originals have been backed up yet.", "=>".blue().bold());
        return Ok(());
    }

    println!("{} {}", "Originals in".bold(), store.dir().as_str().cyan());
    for name in &names {
        println!("   {} {}", "-".dimmed(), name);
    }
    Ok(())
}

/// Copy a backed-up original back over the current image
pub fn run_restore(ctx: &RunContext, file_name: &str) -> Result<()> {
    if file_name.contains(['/', '\\']) {
        return Err(CliError::user("Give a file name, not a path."));
    }

    let engine = ctx.engine()?;
    let root = &engine.paths().destination_root;
    match engine.originals().restore(file_name, root)? {
        Some(path) => {
            println!("{} Restored {}", "OK".green().bold(), path.as_str().cyan());
            println!(
                "{} Restart Steam if you don't see changes.",
                "=>".blue().bold()
            );
            Ok(())
        }
        None => Err(CliError::user(format!(
            "No backup named '{}'. Run 'gridsync backups' to list them.",
            file_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::PathOverrides;
    use grid_test_utils::grid::TestGrid;
    use std::fs;

    fn context(grid: &TestGrid) -> RunContext {
        let mut ctx = RunContext::new(grid.root());
        ctx.overrides = PathOverrides {
            source_dir: Some(grid.source_dir()),
            grid_dir: Some(grid.grid_dir()),
        };
        ctx
    }

    #[test]
    fn restore_puts_original_back() {
        let grid = TestGrid::new();
        fs::create_dir_all(grid.originals_dir()).unwrap();
        fs::write(grid.originals_dir().join("1466640p.png"), b"original").unwrap();
        grid.write_dest("1466640p.png", b"custom");

        run_restore(&context(&grid), "1466640p.png").unwrap();

        grid.assert_dest_content("1466640p.png", b"original");
    }

    #[test]
    fn restore_unknown_backup_is_a_user_error() {
        let grid = TestGrid::new();
        let err = run_restore(&context(&grid), "1p.png").unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn restore_rejects_paths() {
        let grid = TestGrid::new();
        let err = run_restore(&context(&grid), "../secret.png").unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
