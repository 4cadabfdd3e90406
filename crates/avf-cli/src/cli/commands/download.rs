//! `avf cartoon` / `avf generated` – fetch a task list into the destination directory.

use anyhow::{Context, Result};
use avf_core::batch::{run_batch, BatchEvent};
use avf_core::config::FetchConfig;
use avf_core::http::Fetcher;
use avf_core::report::BatchReport;
use avf_core::task::DownloadTask;
use std::path::Path;

/// Runs the batch, printing one line per step, then the summary.
/// Per-item failures are printed, never returned; only writing `report_path` can fail.
pub fn run_download<F: Fetcher + ?Sized>(
    fetch_cfg: &FetchConfig,
    fetcher: &F,
    tasks: &[DownloadTask],
    report_path: Option<&Path>,
) -> Result<BatchReport> {
    let report = run_batch(fetch_cfg, tasks, fetcher, |ev| match ev {
        BatchEvent::DirCreated { dir } => println!("Created {}", dir.display()),
        BatchEvent::Started {
            task, destination, ..
        } => println!(
            "Downloading {} to {}...",
            task.source_url,
            destination.display()
        ),
        BatchEvent::Saved { destination, .. } => {
            let name = destination
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| destination.display().to_string());
            println!("Done: {name}");
        }
        BatchEvent::Failed { task, error, .. } => {
            println!("Error downloading {}: {}", task.source_url, error)
        }
    });

    println!(
        "Saved {} of {} file(s), {} bytes, to {} ({} failed)",
        report.succeeded(),
        report.outcomes.len(),
        report.bytes_saved(),
        report.dest_dir.display(),
        report.failed()
    );

    if let Some(path) = report_path {
        write_report(&report, path)?;
        println!("Report written to {}", path.display());
    }
    Ok(report)
}

pub(crate) fn write_report(report: &BatchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}
