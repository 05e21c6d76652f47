//! Command implementations for grid-cli

pub mod add;
pub mod backups;
pub mod config;
pub mod open;
pub mod sync;

pub use add::{AddRequest, run_add};
pub use backups::{run_backups, run_restore};
pub use config::{run_config_init, run_config_show};
pub use open::run_open;
pub use sync::{SyncOptions, run_check, run_sync};
