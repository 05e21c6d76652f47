//! Per-artifact outcomes and the batch they are collected into.

use grid_fs::NormalizedPath;
use serde::Serialize;

use crate::artifact::{ArtifactDescriptor, ParseFailure};

/// Classification of one artifact within a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Planned for update; only present between planning and execution
    Queued,
    /// The destination now holds the source bytes
    Updated,
    /// The destination already holds identical bytes
    SkippedIdentical,
    /// The source file does not exist
    MissingSource,
    /// The artifact kind is not one Steam understands
    InvalidFormat,
    /// An earlier source image already targets the same destination
    DuplicateTarget { destination: String },
    /// The OS refused access while backing up or replacing
    FailedPermission { message: String },
    /// Any other I/O failure while hashing, backing up or replacing
    FailedIo { message: String },
}

impl SyncOutcome {
    /// Console label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Updated => "UPDATED",
            Self::SkippedIdentical => "SKIPPED",
            Self::MissingSource => "MISSING",
            Self::InvalidFormat => "INVALID",
            Self::DuplicateTarget { .. } => "DUPLICATE",
            Self::FailedPermission { .. } | Self::FailedIo { .. } => "FAILED",
        }
    }

    /// Sentence fragment describing the outcome.
    pub fn info(&self) -> String {
        match self {
            Self::Queued => "image queued for update".into(),
            Self::Updated => "image has been updated".into(),
            Self::SkippedIdentical => "image has been skipped".into(),
            Self::MissingSource => "image does not exist".into(),
            Self::InvalidFormat => "image has an invalid type".into(),
            Self::DuplicateTarget { destination } => {
                format!("image duplicates another image for {destination}")
            }
            Self::FailedPermission { .. } => "image update failed (permission denied)".into(),
            Self::FailedIo { message } => format!("image update failed ({message})"),
        }
    }

    /// Position in the classification order, used to group report lines.
    pub fn priority(&self) -> u8 {
        match self {
            Self::InvalidFormat => 1,
            Self::MissingSource => 2,
            Self::DuplicateTarget { .. } => 3,
            Self::SkippedIdentical => 4,
            Self::Queued => 5,
            Self::Updated => 6,
            Self::FailedPermission { .. } | Self::FailedIo { .. } => 7,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FailedPermission { .. } | Self::FailedIo { .. })
    }
}

/// One descriptor and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub descriptor: ArtifactDescriptor,
    pub outcome: SyncOutcome,
}

/// A source file whose name could not produce a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub path: NormalizedPath,
    pub failure: ParseFailure,
}

impl RejectedEntry {
    /// File name for display; falls back to the full path.
    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }
}

/// Ordered outcomes of one run, plus the files that could not be parsed.
///
/// Produced by planning (with `Queued` entries) and by execution (with every
/// `Queued` entry resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub destination_root: NormalizedPath,
    pub entries: Vec<BatchEntry>,
    pub rejected: Vec<RejectedEntry>,
}

impl BatchResult {
    /// Entries still waiting for execution.
    pub fn queued(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == SyncOutcome::Queued)
    }

    pub fn queued_count(&self) -> usize {
        self.queued().count()
    }

    /// Number of entries whose outcome matches `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.outcome)).count()
    }

    /// Whether execution would change anything.
    pub fn has_pending_updates(&self) -> bool {
        self.queued().next().is_some()
    }
}
