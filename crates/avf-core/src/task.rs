//! Download task model: one source URL paired with one destination file.

use std::path::{Path, PathBuf};

/// A (source URL, destination path) pair to be fetched and saved.
///
/// `destination_path` may be relative; the batch runner resolves it against
/// the configured destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub source_url: String,
    pub destination_path: PathBuf,
}

impl DownloadTask {
    pub fn new(source_url: impl Into<String>, destination_path: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            destination_path: destination_path.into(),
        }
    }

    /// Destination joined onto `dest_dir` unless it is already absolute.
    pub fn resolve_in(&self, dest_dir: &Path) -> PathBuf {
        if self.destination_path.is_absolute() {
            self.destination_path.clone()
        } else {
            dest_dir.join(&self.destination_path)
        }
    }
}
