//! URL validation and listing-page URLs.
//!
//! Source URLs are checked before any network I/O so that a malformed entry
//! becomes an ordinary per-item failure.

mod sanitize;

pub use sanitize::sanitize_filename_component;

use crate::http::FetchError;
use url::Url;

/// Parses `raw` and accepts only `http`/`https` URLs with a host.
pub fn validate_source_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed)
}

/// Listing page for `category`: `base` with the category appended as one path segment.
///
/// A trailing slash on `base` is optional; the category is percent-encoded.
pub fn category_page_url(base: &str, category: &str) -> Result<Url, FetchError> {
    let mut out = validate_source_url(base)?;
    let category = category.trim().trim_matches('/');
    if category.is_empty() {
        return Err(FetchError::InvalidUrl {
            url: base.to_string(),
            reason: "empty category".to_string(),
        });
    }
    out.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl {
            url: base.to_string(),
            reason: "base URL cannot have path segments".to_string(),
        })?
        .pop_if_empty()
        .push(category);
    Ok(out)
}
