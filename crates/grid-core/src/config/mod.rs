//! Configuration
//!
//! A single file holds the Steam account, the Steam folder and the custom
//! grid image folder. It may be TOML, JSON or YAML; the format follows the
//! extension.
//!
//! ```toml
//! [settings]
//! account_id = "12345678"
//! steam_folder = "C:/Program Files (x86)/Steam"
//! source_dir = "D:/Pictures/Grid"
//!
//! [overrides]
//! grid_dir = ""
//! ```

mod resolver;
mod settings;

pub use resolver::{ConfigResolver, PathOverrides, ResolvedConfig};
pub use settings::{GridConfig, Overrides, Settings};
