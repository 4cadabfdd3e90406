//! Link extraction from listing pages.
//!
//! Purely textual: every `src="..."` attribute value is a candidate, no HTML
//! structure is considered. Markup changes on the listing site can silently
//! break extraction; that is a known limitation.

use crate::config::AvfConfig;
use crate::http::{FetchError, Fetcher};
use regex::Regex;
use std::sync::OnceLock;

fn src_attr() -> &'static Regex {
    static SRC_ATTR: OnceLock<Regex> = OnceLock::new();
    SRC_ATTR.get_or_init(|| Regex::new(r#"src="([^"]+)""#).expect("static src pattern"))
}

/// Keeps `src` values that contain one of `allow_list`, truncated to `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkExtractor {
    pub allow_list: Vec<String>,
    pub limit: usize,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::from_config(&AvfConfig::default())
    }
}

impl LinkExtractor {
    pub fn new(allow_list: Vec<String>, limit: usize) -> Self {
        Self { allow_list, limit }
    }

    pub fn from_config(cfg: &AvfConfig) -> Self {
        Self::new(cfg.allow_list.clone(), cfg.extract_limit)
    }

    fn allowed(&self, candidate: &str) -> bool {
        self.allow_list
            .iter()
            .any(|needle| candidate.contains(needle.as_str()))
    }

    /// Allow-listed `src` values of `html`, in document order, at most `limit`.
    pub fn extract(&self, html: &str) -> Vec<String> {
        src_attr()
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|u| self.allowed(u))
            .take(self.limit)
            .map(str::to_string)
            .collect()
    }

    /// GETs `page_url`, decodes it as UTF-8 and runs `extract` on it.
    pub fn fetch_links<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        page_url: &str,
    ) -> Result<Vec<String>, FetchError> {
        let body = fetcher.get(page_url)?;
        let html = String::from_utf8(body)?;
        let links = self.extract(&html);
        tracing::debug!(page = page_url, found = links.len(), "extracted listing links");
        Ok(links)
    }
}
