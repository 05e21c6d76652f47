//! gridsync CLI
//!
//! The command-line interface for syncing custom Steam library artwork.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RunContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Install a log subscriber when `RUST_LOG` is set or `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
    tracing::debug!("Verbose mode enabled");
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = RunContext::new(&std::env::current_dir()?);
    ctx.config_path = cli.config;
    ctx.overrides.source_dir = cli.source;
    ctx.overrides.grid_dir = cli.grid_dir;
    ctx.interactive = interactive::is_interactive();

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!(
                "{} Steam grid artwork sync",
                "gridsync".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "gridsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &RunContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync { dry_run, yes, json } => {
            commands::run_sync(ctx, commands::SyncOptions { dry_run, yes, json })
        }
        Commands::Check { json } => commands::run_check(ctx, json),
        Commands::Add {
            file,
            url,
            kind,
            name,
            force,
        } => commands::run_add(
            ctx,
            commands::AddRequest {
                file: &file,
                url: &url,
                kind,
                name: name.as_deref(),
                force,
            },
        ),
        Commands::Open { folder } => commands::run_open(ctx, folder),
        Commands::Config { init: true, .. } => commands::run_config_init(ctx),
        Commands::Config { json, .. } => commands::run_config_show(ctx, json),
        Commands::Backups { json } => commands::run_backups(ctx, json),
        Commands::Restore { file_name } => commands::run_restore(ctx, &file_name),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gridsync", &mut io::stdout());
            Ok(())
        }
    }
}
