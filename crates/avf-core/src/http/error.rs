//! Per-item fetch/save error.

use std::path::PathBuf;

/// Everything that can go wrong for a single task: bad URL, transport failure,
/// non-2xx status, disk write, or (for listing pages) undecodable text.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("storage {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("page is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

impl FetchError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Storage {
            path: path.into(),
            source,
        }
    }
}
