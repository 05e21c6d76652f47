//! Reconciliation engine
//!
//! Decides, per source artifact, whether Steam's grid folder needs the new
//! bytes, and applies the updates with backup-then-replace semantics.
//! Planning never touches the destination; execution only touches the
//! artifacts the plan queued.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use grid_fs::{ContentDigest, NormalizedPath, RobustnessConfig, io};

use super::outcome::{BatchEntry, BatchResult, SyncOutcome};
use super::scan::SourceScan;
use crate::artifact::ArtifactDescriptor;
use crate::backup::OriginalsStore;
use crate::{Error, Result};

/// The two directories a sync run works between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    /// Custom grid image folder (flat)
    pub source_dir: NormalizedPath,
    /// Steam's `userdata/<account>/config/grid` folder
    pub destination_root: NormalizedPath,
}

/// Image extensions Steam reads from the grid folder, lowercase.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Images currently in the destination, grouped by stem.
///
/// Used to find stale copies of an artifact saved under another extension.
/// Other files (Steam keeps `{app_id}.json` logo positions next to the
/// images) are never indexed.
#[derive(Debug, Default)]
struct DestinationIndex {
    by_stem: HashMap<String, Vec<String>>,
}

impl DestinationIndex {
    fn load(root: &NormalizedPath) -> std::io::Result<Self> {
        let mut by_stem: HashMap<String, Vec<String>> = HashMap::new();
        for entry in fs::read_dir(root.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if !is_image(&path) {
                continue;
            }
            if let (Some(stem), Some(name)) = (path.file_stem(), path.file_name()) {
                by_stem
                    .entry(stem.to_string_lossy().into_owned())
                    .or_default()
                    .push(name.to_string_lossy().into_owned());
            }
        }
        Ok(Self { by_stem })
    }

    /// Names sharing `stem` other than `keep` itself.
    fn siblings(&self, stem: &str, keep: &str) -> Vec<String> {
        self.by_stem
            .get(stem)
            .map(|names| names.iter().filter(|n| *n != keep).cloned().collect())
            .unwrap_or_default()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Synchronizes custom grid images into Steam's grid folder.
pub struct ReconciliationEngine {
    paths: SyncPaths,
    originals: OriginalsStore,
    robustness: RobustnessConfig,
}

impl ReconciliationEngine {
    /// Create an engine for the given source and destination.
    pub fn new(paths: SyncPaths) -> Self {
        Self::with_robustness(paths, RobustnessConfig::default())
    }

    /// Create an engine with custom write settings.
    pub fn with_robustness(paths: SyncPaths, robustness: RobustnessConfig) -> Self {
        let originals = OriginalsStore::with_robustness(&paths.destination_root, robustness);
        Self {
            paths,
            originals,
            robustness,
        }
    }

    pub fn paths(&self) -> &SyncPaths {
        &self.paths
    }

    pub fn originals(&self) -> &OriginalsStore {
        &self.originals
    }

    /// List and parse the source directory.
    pub fn scan(&self) -> Result<SourceScan> {
        SourceScan::scan_dir(&self.paths.source_dir)
    }

    /// Scan, plan and execute in one go.
    pub fn sync(&self) -> Result<BatchResult> {
        let plan = self.plan(self.scan()?)?;
        self.execute(plan)
    }

    /// Classify every scanned descriptor without touching the destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationRootMissing`] when the grid folder does not
    /// exist. Per-artifact problems are outcomes, never errors.
    pub fn plan(&self, scan: SourceScan) -> Result<BatchResult> {
        let root = &self.paths.destination_root;
        self.ensure_destination_root()?;
        if root.is_network_path() {
            tracing::warn!(root = %root, "Destination is a network path; renames may not be atomic");
        }

        let index = DestinationIndex::load(root)
            .map_err(|e| grid_fs::Error::io(root.to_native(), e))?;
        let mut claimed = HashSet::new();

        let entries = scan
            .descriptors
            .into_iter()
            .map(|descriptor| {
                let outcome = self.classify(&descriptor, &index, &mut claimed);
                tracing::debug!(
                    artifact = %descriptor,
                    outcome = outcome.label(),
                    "Classified artifact"
                );
                BatchEntry {
                    descriptor,
                    outcome,
                }
            })
            .collect();

        Ok(BatchResult {
            destination_root: root.clone(),
            entries,
            rejected: scan.rejected,
        })
    }

    /// Apply every `Queued` entry of `plan`; other entries pass through.
    ///
    /// One artifact failing never stops the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationRootMissing`] if the grid folder vanished
    /// since planning; nothing is written in that case.
    pub fn execute(&self, mut plan: BatchResult) -> Result<BatchResult> {
        if !plan.has_pending_updates() {
            return Ok(plan);
        }
        self.ensure_destination_root()?;

        let root = &self.paths.destination_root;
        let index = DestinationIndex::load(root)
            .map_err(|e| grid_fs::Error::io(root.to_native(), e))?;

        for entry in plan
            .entries
            .iter_mut()
            .filter(|e| e.outcome == SyncOutcome::Queued)
        {
            entry.outcome = match self.update(&entry.descriptor, &index) {
                Ok(()) => {
                    tracing::info!(artifact = %entry.descriptor, "Updated artifact");
                    SyncOutcome::Updated
                }
                Err(e) => {
                    tracing::warn!(artifact = %entry.descriptor, error = %e, "Update failed");
                    failure_outcome(&e)
                }
            };
        }

        Ok(plan)
    }

    fn ensure_destination_root(&self) -> Result<()> {
        let root = &self.paths.destination_root;
        if root.is_dir() {
            Ok(())
        } else {
            Err(Error::DestinationRootMissing {
                path: root.to_native(),
            })
        }
    }

    /// First match wins: invalid, missing, duplicate, identical, queued.
    fn classify(
        &self,
        descriptor: &ArtifactDescriptor,
        index: &DestinationIndex,
        claimed: &mut HashSet<String>,
    ) -> SyncOutcome {
        let (Some(stem), Some(file_name)) = (
            descriptor.destination_stem(),
            descriptor.destination_file_name(),
        ) else {
            return SyncOutcome::InvalidFormat;
        };

        if !descriptor.source_exists() {
            return SyncOutcome::MissingSource;
        }

        if !claimed.insert(stem.clone()) {
            return SyncOutcome::DuplicateTarget {
                destination: file_name,
            };
        }

        let source = match ContentDigest::of_file(descriptor.source_path().as_ref()) {
            Ok(ContentDigest::Absent) => return SyncOutcome::MissingSource,
            Ok(digest) => digest,
            Err(e) => {
                return failure_outcome(&grid_fs::Error::io(descriptor.source_path().to_native(), e));
            }
        };

        let dest_path = self.paths.destination_root.join(&file_name);
        let dest = match ContentDigest::of_file(dest_path.as_ref()) {
            Ok(digest) => digest,
            Err(e) => return failure_outcome(&grid_fs::Error::io(dest_path.to_native(), e)),
        };

        if source == dest && self.stale_paths(index, &stem, &file_name).is_empty() {
            SyncOutcome::SkippedIdentical
        } else {
            SyncOutcome::Queued
        }
    }

    /// Back up whatever occupies the artifact's canonical stem, write the
    /// source bytes into place, then drop copies under other extensions.
    fn update(&self, descriptor: &ArtifactDescriptor, index: &DestinationIndex) -> grid_fs::Result<()> {
        let root = &self.paths.destination_root;
        let (Some(stem), Some(file_name)) = (
            descriptor.destination_stem(),
            descriptor.destination_file_name(),
        ) else {
            return Ok(());
        };

        let dest = root.join(&file_name);
        let stale = self.stale_paths(index, &stem, &file_name);

        self.originals.back_up(&dest)?;
        for path in &stale {
            self.originals.back_up(path)?;
        }

        io::copy_atomic(descriptor.source_path().as_ref(), &dest, self.robustness)?;

        for path in &stale {
            if io::is_same_file(path.as_ref(), dest.as_ref()) {
                continue;
            }
            tracing::debug!(path = %path, "Removing stale artifact");
            io::remove_file(path)?;
        }
        Ok(())
    }

    /// Destination images holding another copy of the artifact with stem
    /// `stem`, excluding any name that resolves to `file_name` itself
    /// (`1p.PNG` and `1p.png` on a case-insensitive filesystem).
    fn stale_paths(
        &self,
        index: &DestinationIndex,
        stem: &str,
        file_name: &str,
    ) -> Vec<NormalizedPath> {
        let root = &self.paths.destination_root;
        let dest = root.join(file_name);
        index
            .siblings(stem, file_name)
            .iter()
            .map(|name| root.join(name))
            .filter(|path| !io::is_same_file(path.as_ref(), dest.as_ref()))
            .collect()
    }
}

fn failure_outcome(err: &grid_fs::Error) -> SyncOutcome {
    if err.is_permission_denied() {
        SyncOutcome::FailedPermission {
            message: err.to_string(),
        }
    } else {
        SyncOutcome::FailedIo {
            message: err.to_string(),
        }
    }
}
