//! CLI for the AVF avatar fetcher.

mod commands;

use anyhow::Result;
use avf_core::config;
use avf_core::http::CurlFetcher;
use avf_core::sources;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_download, run_links, run_scrape};

/// Top-level CLI for AVF.
#[derive(Debug, Parser)]
#[command(name = "avf")]
#[command(about = "AVF: fetch placeholder avatars into a local directory", long_about = None)]
pub struct Cli {
    /// Directory to save avatars into (overrides `dest_dir` from config.toml).
    #[arg(long, global = true, value_name = "DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Write a JSON report of the run to FILE (`links` downloads nothing and ignores it).
    #[arg(long, global = true, value_name = "FILE")]
    pub report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the static list of cartoon avatars (avatar_N.jpg).
    Cartoon,

    /// Download generated avatars from DiceBear, Pravatar and RoboHash.
    Generated,

    /// Scrape a listing page for avatar links and download them.
    Scrape {
        /// Listing category, e.g. "human" or "cartoon".
        category: String,

        /// Filename prefix for saved files (defaults to the category).
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print the avatar links found on a listing page without downloading.
    Links {
        /// Listing category, e.g. "human" or "cartoon".
        category: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let fetch_cfg = cfg.fetch_config(cli.dest_dir.as_deref());
        let fetcher = CurlFetcher::from_config(&fetch_cfg);
        let report = cli.report.as_deref();

        match cli.command {
            CliCommand::Cartoon => {
                run_download(&fetch_cfg, &fetcher, &sources::cartoon_tasks(), report)?;
            }
            CliCommand::Generated => {
                run_download(&fetch_cfg, &fetcher, &sources::generated_tasks(), report)?;
            }
            CliCommand::Scrape { category, prefix } => {
                run_scrape(
                    &cfg,
                    &fetch_cfg,
                    &fetcher,
                    &category,
                    prefix.as_deref(),
                    report,
                )?;
            }
            CliCommand::Links { category } => run_links(&cfg, &fetcher, &category),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
