//! Batch reporting
//!
//! Turns a [`BatchResult`] into ordered, human-readable lines and counts.
//! Nothing here touches the filesystem.

use serde::Serialize;

use crate::sync::{BatchEntry, BatchResult, RejectedEntry, SyncOutcome};

/// Label used for files whose names could not be parsed.
pub const REJECTED_LABEL: &str = "REJECTED";

/// Number of artifacts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub rejected: usize,
    pub invalid: usize,
    pub missing: usize,
    pub duplicate: usize,
    pub skipped: usize,
    pub queued: usize,
    pub updated: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: &SyncOutcome) {
        let slot = match outcome {
            SyncOutcome::InvalidFormat => &mut self.invalid,
            SyncOutcome::MissingSource => &mut self.missing,
            SyncOutcome::DuplicateTarget { .. } => &mut self.duplicate,
            SyncOutcome::SkippedIdentical => &mut self.skipped,
            SyncOutcome::Queued => &mut self.queued,
            SyncOutcome::Updated => &mut self.updated,
            SyncOutcome::FailedPermission { .. } | SyncOutcome::FailedIo { .. } => {
                &mut self.failed
            }
        };
        *slot += 1;
    }
}

/// One printable line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub label: &'static str,
    /// Everything after the label
    pub detail: String,
    /// Source file name
    pub source: String,
    /// `None` for rejected files
    pub outcome: Option<SyncOutcome>,
    #[serde(skip)]
    priority: u8,
}

impl ReportLine {
    fn for_entry(entry: &BatchEntry) -> Self {
        let d = &entry.descriptor;
        Self {
            label: entry.outcome.label(),
            detail: format!(
                "{}'s {} {} - {}",
                d.display_name(),
                d.kind_label().to_uppercase(),
                entry.outcome.info(),
                d.app_id()
            ),
            source: d.source_path().file_name().unwrap_or_default().to_string(),
            outcome: Some(entry.outcome.clone()),
            priority: entry.outcome.priority(),
        }
    }

    fn for_rejected(rejected: &RejectedEntry) -> Self {
        Self {
            label: REJECTED_LABEL,
            detail: format!("{} {}", rejected.file_name(), rejected.failure.reason()),
            source: rejected.file_name().to_string(),
            outcome: None,
            priority: 0,
        }
    }

    /// Full line text, label padded to a fixed column.
    pub fn text(&self) -> String {
        format!("{:<7} {}", self.label, self.detail)
    }
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: usize,
    pub counts: OutcomeCounts,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn had_failures(&self) -> bool {
        self.counts.failed > 0
    }

    /// Guidance printed when any update failed.
    pub fn failure_message(&self) -> Option<String> {
        match self.counts.failed {
            0 => None,
            1 => Some("1 image failed to update. Close Steam and retry.".to_string()),
            n => Some(format!("{n} images failed to update. Close Steam and retry.")),
        }
    }

    /// Lines whose outcome matches `predicate`.
    pub fn lines_where(
        &self,
        predicate: impl Fn(Option<&SyncOutcome>) -> bool,
    ) -> impl Iterator<Item = &ReportLine> {
        self.lines
            .iter()
            .filter(move |line| predicate(line.outcome.as_ref()))
    }
}

/// Builds [`Report`]s.
pub struct BatchReporter;

impl BatchReporter {
    /// Summarize `batch`: rejected files first, then entries grouped by
    /// outcome priority, keeping scan order within a group.
    pub fn summarize(batch: &BatchResult) -> Report {
        let mut counts = OutcomeCounts {
            rejected: batch.rejected.len(),
            ..OutcomeCounts::default()
        };

        let mut lines: Vec<ReportLine> = batch
            .rejected
            .iter()
            .map(ReportLine::for_rejected)
            .collect();

        for entry in &batch.entries {
            counts.record(&entry.outcome);
            lines.push(ReportLine::for_entry(entry));
        }
        lines.sort_by_key(|line| line.priority);

        Report {
            total: batch.entries.len() + batch.rejected.len(),
            counts,
            lines,
        }
    }
}
