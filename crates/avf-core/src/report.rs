//! Per-item outcomes collected into a batch report.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// What happened to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Body written in full; `sha256` is the digest of the bytes on disk.
    Saved { bytes: u64, sha256: String },
    /// Fetch or write failed; the message is the rendered `FetchError`.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub source_url: String,
    /// Resolved destination (joined onto the batch directory).
    pub destination_path: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl TaskOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self.status, OutcomeStatus::Saved { .. })
    }
}

/// Result of one fetch-and-save run, in task order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub dest_dir: PathBuf,
    /// True when this run created `dest_dir`.
    pub dir_created: bool,
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    pub fn new(dest_dir: &Path, dir_created: bool) -> Self {
        Self {
            dest_dir: dest_dir.to_path_buf(),
            dir_created,
            outcomes: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every task was saved (vacuously true for an empty batch).
    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }

    /// Total bytes written across saved files.
    pub fn bytes_saved(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                OutcomeStatus::Saved { bytes, .. } => *bytes,
                OutcomeStatus::Failed { .. } => 0,
            })
            .sum()
    }
}
