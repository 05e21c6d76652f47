//! Core library for gridsync
//!
//! This crate keeps Steam's library artwork folder in step with a folder of
//! custom images, implementing:
//!
//! - **Artifact descriptors**: parsing `{name}_{kind}_{app_id}.{ext}` source names
//!   and mapping them to the filenames Steam reads
//! - **Reconciliation**: plan/execute sync with content-hash identity checks
//! - **Backups**: originals kept under `{grid}/originals` before replacement
//! - **Reporting**: ordered, serializable run summaries
//! - **Configuration**: locating the config file and resolving both folders
//! - **Naming**: composing source names from store URLs
//!
//! # Architecture
//!
//! ```text
//!        gridsync (CLI)
//!              |
//!          grid-core
//!              |
//!           grid-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_core::{BatchReporter, ReconciliationEngine, SyncPaths};
//! use grid_fs::NormalizedPath;
//!
//! let engine = ReconciliationEngine::new(SyncPaths {
//!     source_dir: NormalizedPath::new("D:/Pictures/Grid"),
//!     destination_root: NormalizedPath::new("C:/Steam/userdata/1/config/grid"),
//! });
//! let plan = engine.plan(engine.scan()?)?;
//! let done = engine.execute(plan)?;
//! for line in BatchReporter::summarize(&done).lines {
//!     println!("{}", line.text());
//! }
//! ```

pub mod artifact;
pub mod backup;
pub mod config;
pub mod error;
pub mod naming;
pub mod report;
pub mod sync;

pub use artifact::{ArtifactDescriptor, ArtifactKind, ParseFailure, UnknownKind};
pub use backup::{BackupAction, OriginalsStore};
pub use config::{ConfigResolver, GridConfig, PathOverrides, ResolvedConfig};
pub use error::{Error, Result};
pub use report::{BatchReporter, OutcomeCounts, Report, ReportLine};
pub use sync::{
    BatchEntry, BatchResult, ReconciliationEngine, RejectedEntry, SourceScan, SyncOutcome,
    SyncPaths,
};
