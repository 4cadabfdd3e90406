//! CLI command handlers. Each command is in its own file.

mod download;
mod links;
mod scrape;

pub use download::run_download;
pub use links::run_links;
pub use scrape::run_scrape;
