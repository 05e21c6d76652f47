//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation and menus.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use grid_core::SyncPaths;

use crate::commands::open::open_folder;
use crate::error::Result;

/// Entries of the menu shown after an interactive sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Exit,
    OpenSource,
    OpenGrid,
}

impl NextAction {
    pub const ALL: [NextAction; 3] = [Self::Exit, Self::OpenSource, Self::OpenGrid];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::OpenSource => "Open custom grid image folder",
            Self::OpenGrid => "Open Steam grid folder",
        }
    }
}

/// Whether both stdin and stdout are attached to a terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Ask a yes/no question, defaulting to yes.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(true).interact()?)
}

/// Ask for the game name when the store URL has none.
pub fn prompt_game_name() -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt("Game name")
        .interact_text()?)
}

/// Offer to open the source or grid folder until the user exits.
pub fn next_action_loop(paths: &SyncPaths) -> Result<()> {
    let labels: Vec<&str> = NextAction::ALL.iter().map(NextAction::label).collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        let dir = match NextAction::ALL[idx] {
            NextAction::Exit => return Ok(()),
            NextAction::OpenSource => &paths.source_dir,
            NextAction::OpenGrid => &paths.destination_root,
        };
        if let Err(e) = open_folder(&dir.to_native()) {
            println!("{} {}", "!".yellow(), e);
        }
    }
}
