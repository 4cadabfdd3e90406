//! `avf links <category>` – print allow-listed links from a listing page.

use avf_core::config::AvfConfig;
use avf_core::extract::LinkExtractor;
use avf_core::http::Fetcher;
use avf_core::url_model::category_page_url;

/// Fetches the listing page for `category` and returns its allow-listed links.
/// A bad URL or failed fetch is printed and treated as "no links".
pub(crate) fn scrape_links<F: Fetcher + ?Sized>(
    cfg: &AvfConfig,
    fetcher: &F,
    category: &str,
) -> Vec<String> {
    let extractor = LinkExtractor::from_config(cfg);
    let result = category_page_url(cfg.listing_base_url(), category)
        .and_then(|page| extractor.fetch_links(fetcher, page.as_str()));
    match result {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!(category, error = %e, "listing page fetch failed");
            println!("Error fetching {category}: {e}");
            Vec::new()
        }
    }
}

pub fn run_links<F: Fetcher + ?Sized>(cfg: &AvfConfig, fetcher: &F, category: &str) {
    for url in scrape_links(cfg, fetcher, category) {
        println!("{url}");
    }
}
