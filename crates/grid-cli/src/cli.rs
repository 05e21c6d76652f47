//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use grid_core::ArtifactKind;

/// gridsync - Keep Steam's library artwork in step with your custom images
#[derive(Parser, Debug)]
#[command(name = "gridsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./gridsync.toml, then the user config directory)
    #[arg(long, global = true, env = "GRIDSYNC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Custom grid image folder, overriding the configuration
    #[arg(long, global = true, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Steam grid folder, overriding the configuration
    #[arg(long, global = true, value_name = "DIR")]
    pub grid_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Folders the `open` command knows about
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    /// Custom grid image folder
    Source,
    /// Steam grid folder
    Grid,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Copy new and changed images into Steam's grid folder
    ///
    /// Examples:
    ///   gridsync sync              # Review the queue, confirm, apply
    ///   gridsync sync --dry-run    # Only show what would change
    ///   gridsync sync --yes        # Apply without asking
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report what a sync would do, without prompting or writing
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Add a downloaded image to the custom grid folder
    ///
    /// The image is renamed after the game in the store URL.
    ///
    /// Examples:
    ///   gridsync add capsule.png --kind grid --url https://store.steampowered.com/app/1466640/Road_96/
    Add {
        /// Image file to add
        file: PathBuf,

        /// Steam store page of the game
        #[arg(short, long)]
        url: String,

        /// Artwork kind: hero, logo, grid or active
        #[arg(short, long, value_name = "KIND")]
        kind: ArtifactKind,

        /// Game name, used when the URL does not carry one
        #[arg(short, long)]
        name: Option<String>,

        /// Replace an existing image with the same name
        #[arg(short, long)]
        force: bool,
    },

    /// Open a folder in the file browser
    Open {
        /// Folder to open
        #[arg(value_enum)]
        folder: Folder,
    },

    /// Show the resolved configuration
    Config {
        /// Write a starter configuration file
        #[arg(long)]
        init: bool,

        /// Output as JSON for scripting
        #[arg(long, conflicts_with = "init")]
        json: bool,
    },

    /// List the originals kept before images were replaced
    Backups {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Put a backed-up original back into Steam's grid folder
    Restore {
        /// File name in the backup folder, e.g. 1466640p.png
        file_name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_command() {
        let cli = Cli::parse_from(["gridsync"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_sync_flags() {
        let cli = Cli::parse_from(["gridsync", "sync", "--dry-run", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Sync {
                dry_run: true,
                yes: false,
                json: true
            })
        );
    }

    #[test]
    fn parse_global_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "gridsync",
            "check",
            "--source",
            "/pics",
            "--grid-dir",
            "/grid",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.source, Some(PathBuf::from("/pics")));
        assert_eq!(cli.grid_dir, Some(PathBuf::from("/grid")));
        assert_eq!(cli.command, Some(Commands::Check { json: false }));
    }

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "gridsync",
            "add",
            "capsule.png",
            "--url",
            "https://store.steampowered.com/app/1466640/Road_96/",
            "--kind",
            "hero",
        ]);
        match cli.command {
            Some(Commands::Add {
                file, kind, force, ..
            }) => {
                assert_eq!(file, PathBuf::from("capsule.png"));
                assert_eq!(kind, ArtifactKind::Hero);
                assert!(!force);
            }
            other => panic!("Expected Add command, got {other:?}"),
        }
    }

    #[test]
    fn parse_add_rejects_unknown_kind() {
        let result = Cli::try_parse_from([
            "gridsync", "add", "a.png", "--url", "x", "--kind", "banner",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_open_command() {
        let cli = Cli::parse_from(["gridsync", "open", "grid"]);
        assert_eq!(
            cli.command,
            Some(Commands::Open {
                folder: Folder::Grid
            })
        );
    }

    #[test]
    fn parse_restore_command() {
        let cli = Cli::parse_from(["gridsync", "restore", "1466640p.png"]);
        assert_eq!(
            cli.command,
            Some(Commands::Restore {
                file_name: "1466640p.png".into()
            })
        );
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["gridsync", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
