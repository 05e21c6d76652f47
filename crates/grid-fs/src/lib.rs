//! Filesystem primitives for gridsync
//!
//! Provides content digests, normalized paths, atomic writes, and
//! format-agnostic config files. Nothing here knows about artifacts.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::ContentDigest;
pub use config::{ConfigFormat, ConfigStore};
pub use constants::GridPath;
pub use error::{Error, Result, is_permission_error};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
