//! Backups of replaced grid artwork
//!
//! Before an artifact in the destination is replaced or removed, a copy goes
//! to `{destination_root}/originals/{file name}`. A backup is only rewritten
//! when its content differs from the file being replaced.

mod originals;

pub use originals::{BackupAction, OriginalsStore};
