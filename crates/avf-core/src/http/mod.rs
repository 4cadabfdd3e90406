//! Blocking HTTP GET.
//!
//! Uses the curl crate (libcurl) for a single-attempt GET that follows
//! redirects and sends the configured `User-Agent`. No total timeout is set;
//! a connect timeout is applied only when configured.

mod error;

pub use error::FetchError;

use crate::config::FetchConfig;
use crate::url_model::validate_source_url;
use std::time::Duration;

/// Fetches a URL and returns the full response body.
///
/// The batch runner and link extractor only depend on this trait, so tests can
/// substitute canned responses.
pub trait Fetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// libcurl-backed fetcher. A fresh easy handle is used per request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    connect_timeout: Option<Duration>,
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout: None,
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout,
        }
    }
}

impl Fetcher for CurlFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        // curl gets the normalized form of exactly what was validated.
        let parsed = validate_source_url(url)?;

        let mut body: Vec<u8> = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(parsed.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        tracing::debug!(url, bytes = body.len(), "GET ok");
        Ok(body)
    }
}
