//! Bulk fetch-and-save.
//!
//! Runs tasks strictly in order on the calling thread. Each task is one GET
//! followed by one write; a failure is recorded for that task and the loop
//! moves on. Nothing is retried and nothing aborts the batch.

use crate::checksum::sha256_hex;
use crate::config::FetchConfig;
use crate::http::{FetchError, Fetcher};
use crate::report::{BatchReport, OutcomeStatus, TaskOutcome};
use crate::storage;
use crate::task::DownloadTask;
use std::io;
use std::path::Path;

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// The destination directory did not exist and was created.
    DirCreated { dir: &'a Path },
    Started {
        index: usize,
        task: &'a DownloadTask,
        destination: &'a Path,
    },
    Saved {
        index: usize,
        task: &'a DownloadTask,
        destination: &'a Path,
        bytes: u64,
    },
    Failed {
        index: usize,
        task: &'a DownloadTask,
        destination: &'a Path,
        error: &'a FetchError,
    },
}

/// GET `url` and write the body unmodified to `destination`.
/// Returns `(bytes, sha256)` of what was written.
pub fn fetch_and_save<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    destination: &Path,
) -> Result<(u64, String), FetchError> {
    let body = fetcher.get(url)?;
    storage::save_bytes(destination, &body)?;
    Ok((body.len() as u64, sha256_hex(&body)))
}

/// Fetches every task in order, saving under `cfg.dest_dir`.
///
/// The destination directory is created once, before any fetch, only if it
/// is missing. If it cannot be created every task is reported as failed
/// without touching the network.
pub fn run_batch<F, E>(
    cfg: &FetchConfig,
    tasks: &[DownloadTask],
    fetcher: &F,
    mut on_event: E,
) -> BatchReport
where
    F: Fetcher + ?Sized,
    E: FnMut(&BatchEvent<'_>),
{
    let dest_dir = cfg.dest_dir.as_path();
    let dir_result = storage::ensure_dir(dest_dir);
    let dir_created = matches!(dir_result, Ok(true));
    let mut report = BatchReport::new(dest_dir, dir_created);

    if dir_created {
        tracing::debug!(dir = %dest_dir.display(), "created destination directory");
        on_event(&BatchEvent::DirCreated { dir: dest_dir });
    }

    let dir_error = dir_result.err();
    if let Some(e) = &dir_error {
        tracing::warn!(dir = %dest_dir.display(), error = %e, "cannot create destination directory");
    }

    for (index, task) in tasks.iter().enumerate() {
        let destination = task.resolve_in(dest_dir);
        on_event(&BatchEvent::Started {
            index,
            task,
            destination: &destination,
        });

        let result = match &dir_error {
            Some(e) => Err(FetchError::storage(
                dest_dir,
                io::Error::new(e.kind(), e.to_string()),
            )),
            None => fetch_and_save(fetcher, &task.source_url, &destination),
        };

        let status = match result {
            Ok((bytes, sha256)) => {
                tracing::info!(url = %task.source_url, path = %destination.display(), bytes, "saved");
                on_event(&BatchEvent::Saved {
                    index,
                    task,
                    destination: &destination,
                    bytes,
                });
                OutcomeStatus::Saved { bytes, sha256 }
            }
            Err(error) => {
                tracing::warn!(url = %task.source_url, path = %destination.display(), error = %error, "download failed");
                on_event(&BatchEvent::Failed {
                    index,
                    task,
                    destination: &destination,
                    error: &error,
                });
                OutcomeStatus::Failed {
                    error: error.to_string(),
                }
            }
        };

        report.outcomes.push(TaskOutcome {
            source_url: task.source_url.clone(),
            destination_path: destination,
            status,
        });
    }

    tracing::info!(
        dir = %dest_dir.display(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned bodies; unknown URLs return HTTP 404. Records request order.
    #[derive(Default)]
    struct CannedFetcher {
        bodies: HashMap<String, Vec<u8>>,
        requested: RefCell<Vec<String>>,
    }

    impl CannedFetcher {
        fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.bodies.insert(url.to_string(), body.to_vec());
            self
        }
    }

    impl Fetcher for CannedFetcher {
        fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.bodies.get(url).cloned().ok_or(FetchError::Http(404))
        }
    }

    fn cfg_in(dir: &Path) -> FetchConfig {
        FetchConfig {
            dest_dir: dir.to_path_buf(),
            ..FetchConfig::default()
        }
    }

    #[test]
    fn middle_failure_does_not_stop_batch() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("avatars");
        let fetcher = CannedFetcher::default()
            .with("https://example.com/1.jpg", b"one")
            .with("https://example.com/3.jpg", b"three");
        let tasks = vec![
            DownloadTask::new("https://example.com/1.jpg", "avatar_1.jpg"),
            DownloadTask::new("https://example.com/2.jpg", "avatar_2.jpg"),
            DownloadTask::new("https://example.com/3.jpg", "avatar_3.jpg"),
        ];

        let report = run_batch(&cfg_in(&dest), &tasks, &fetcher, |_| {});

        assert_eq!(fetcher.requested.borrow().len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.outcomes[0].is_saved());
        assert_eq!(
            report.outcomes[1].status,
            OutcomeStatus::Failed {
                error: "HTTP 404".to_string()
            }
        );
        assert!(report.outcomes[2].is_saved());

        let mut names: Vec<_> = std::fs::read_dir(&dest)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["avatar_1.jpg", "avatar_3.jpg"]);
        assert_eq!(std::fs::read(dest.join("avatar_1.jpg")).unwrap(), b"one");
        assert_eq!(std::fs::read(dest.join("avatar_3.jpg")).unwrap(), b"three");
    }

    #[test]
    fn creates_missing_dir_before_first_fetch() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("public").join("avatars");
        let fetcher = CannedFetcher::default().with("https://example.com/a.png", b"a");
        let tasks = vec![DownloadTask::new("https://example.com/a.png", "robot_1.png")];

        let mut events = Vec::new();
        let report = run_batch(&cfg_in(&dest), &tasks, &fetcher, |ev| {
            events.push(match ev {
                BatchEvent::DirCreated { .. } => "dir",
                BatchEvent::Started { .. } => "start",
                BatchEvent::Saved { .. } => "saved",
                BatchEvent::Failed { .. } => "failed",
            })
        });

        assert!(report.dir_created);
        assert_eq!(events, vec!["dir", "start", "saved"]);
        assert!(dest.join("robot_1.png").exists());
    }

    #[test]
    fn existing_dir_is_not_recreated() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("already_here.jpg"), b"keep").unwrap();
        let report = run_batch(&cfg_in(root.path()), &[], &CannedFetcher::default(), |ev| {
            assert!(!matches!(ev, BatchEvent::DirCreated { .. }))
        });
        assert!(!report.dir_created);
        assert!(report.outcomes.is_empty());
        assert_eq!(
            std::fs::read(root.path().join("already_here.jpg")).unwrap(),
            b"keep"
        );
    }

    #[test]
    fn unusable_dir_fails_every_task_without_fetching() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("avatars");
        std::fs::write(&dest, b"not a dir").unwrap();
        let fetcher = CannedFetcher::default().with("https://example.com/1.jpg", b"one");
        let tasks = vec![
            DownloadTask::new("https://example.com/1.jpg", "avatar_1.jpg"),
            DownloadTask::new("https://example.com/2.jpg", "avatar_2.jpg"),
        ];

        let report = run_batch(&cfg_in(&dest), &tasks, &fetcher, |_| {});

        assert!(fetcher.requested.borrow().is_empty());
        assert_eq!(report.failed(), 2);
        assert!(!report.dir_created);
    }

    #[test]
    fn saved_outcome_records_size_and_digest() {
        let root = tempfile::tempdir().unwrap();
        let fetcher = CannedFetcher::default().with("https://example.com/h.txt", b"hello\n");
        let tasks = vec![DownloadTask::new("https://example.com/h.txt", "h.txt")];
        let report = run_batch(&cfg_in(root.path()), &tasks, &fetcher, |_| {});
        assert_eq!(
            report.outcomes[0].status,
            OutcomeStatus::Saved {
                bytes: 6,
                sha256: "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
                    .to_string()
            }
        );
        assert_eq!(report.outcomes[0].destination_path, root.path().join("h.txt"));
    }

    #[test]
    fn tasks_run_in_input_order() {
        let root = tempfile::tempdir().unwrap();
        let fetcher = CannedFetcher::default();
        let tasks: Vec<_> = (1..=4)
            .map(|i| DownloadTask::new(format!("https://example.com/{i}"), format!("f{i}")))
            .collect();
        run_batch(&cfg_in(root.path()), &tasks, &fetcher, |_| {});
        assert_eq!(
            *fetcher.requested.borrow(),
            vec![
                "https://example.com/1",
                "https://example.com/2",
                "https://example.com/3",
                "https://example.com/4",
            ]
        );
    }
}
