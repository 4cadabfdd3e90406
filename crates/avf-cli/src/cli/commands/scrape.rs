//! `avf scrape <category>` – extract links from a listing page, then download them.

use anyhow::Result;
use avf_core::config::{AvfConfig, FetchConfig};
use avf_core::http::Fetcher;
use avf_core::report::BatchReport;
use avf_core::sources::numbered_tasks;
use std::path::Path;

use super::download::{run_download, write_report};
use super::links::scrape_links;

/// Scraped avatars are always saved with this extension.
const SCRAPED_EXT: &str = "jpg";

pub fn run_scrape<F: Fetcher + ?Sized>(
    cfg: &AvfConfig,
    fetch_cfg: &FetchConfig,
    fetcher: &F,
    category: &str,
    prefix: Option<&str>,
    report_path: Option<&Path>,
) -> Result<()> {
    println!("Fetching {category} avatars...");
    let urls = scrape_links(cfg, fetcher, category);
    if urls.is_empty() {
        println!("No {category} avatar URLs found.");
        // Empty report; the destination directory is left untouched.
        if let Some(path) = report_path {
            write_report(&BatchReport::new(&fetch_cfg.dest_dir, false), path)?;
            println!("Report written to {}", path.display());
        }
        return Ok(());
    }
    let tasks = numbered_tasks(urls, prefix.unwrap_or(category), SCRAPED_EXT);
    run_download(fetch_cfg, fetcher, &tasks, report_path)?;
    Ok(())
}
