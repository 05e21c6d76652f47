//! Reconciliation of custom grid images with Steam's grid folder
//!
//! This module provides:
//! - **scan**: list and parse the custom grid image folder
//! - **plan**: classify each artifact without touching the destination
//! - **execute**: back up and replace the artifacts a plan queued
//! - **outcome**: per-artifact outcomes and the batch they form

mod engine;
mod outcome;
mod scan;

pub use engine::{ReconciliationEngine, SyncPaths};
pub use outcome::{BatchEntry, BatchResult, RejectedEntry, SyncOutcome};
pub use scan::SourceScan;
