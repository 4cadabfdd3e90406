use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser User-Agent sent with every request; some avatar hosts reject the curl default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Directory avatars are saved into when neither config nor CLI override it.
pub const DEFAULT_DEST_DIR: &str = "public/avatars";

/// Listing pages are `<base><category>`.
pub const DEFAULT_LISTING_BASE_URL: &str = "https://uifaces.co/category/";

/// Maximum number of links kept from a listing page.
pub const DEFAULT_EXTRACT_LIMIT: usize = 10;

fn default_allow_list() -> Vec<String> {
    vec!["uifaces".to_string(), "mighty.tools".to_string()]
}

/// Global configuration loaded from `~/.config/avf/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvfConfig {
    /// Directory saved avatars are written into (created on demand).
    pub dest_dir: PathBuf,
    /// `User-Agent` header sent with every GET.
    pub user_agent: String,
    /// Maximum number of links the extractor returns per listing page.
    pub extract_limit: usize,
    /// Substrings a scraped URL must contain (any one of them) to be kept.
    pub allow_list: Vec<String>,
    /// Optional connect timeout in seconds. None leaves the curl default in place.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional override of the listing page base URL (category is appended).
    #[serde(default)]
    pub listing_base_url: Option<String>,
}

impl Default for AvfConfig {
    fn default() -> Self {
        Self {
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            extract_limit: DEFAULT_EXTRACT_LIMIT,
            allow_list: default_allow_list(),
            connect_timeout_secs: None,
            listing_base_url: None,
        }
    }
}

impl AvfConfig {
    /// Builds the per-run fetch settings, letting `dest_override` win over `dest_dir`.
    pub fn fetch_config(&self, dest_override: Option<&Path>) -> FetchConfig {
        FetchConfig {
            dest_dir: dest_override
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.dest_dir.clone()),
            user_agent: self.user_agent.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Base URL for listing pages.
    pub fn listing_base_url(&self) -> &str {
        self.listing_base_url
            .as_deref()
            .unwrap_or(DEFAULT_LISTING_BASE_URL)
    }
}

/// Settings passed explicitly into a fetch-and-save run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Directory relative task destinations are resolved against.
    pub dest_dir: PathBuf,
    pub user_agent: String,
    pub connect_timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        AvfConfig::default().fetch_config(None)
    }
}

/// Location of `config.toml`, creating its parent directory.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("avf")?;
    let wanted = xdg_dirs.get_config_file("config.toml");
    xdg_dirs
        .place_config_file("config.toml")
        .with_context(|| format!("cannot create config directory for {}", wanted.display()))
}

/// Load configuration from disk, creating a default file if none exists.
///
/// An unusable config directory is not fatal: built-in defaults are used.
pub fn load_or_init() -> Result<AvfConfig> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "config unavailable, using defaults");
            Ok(AvfConfig::default())
        }
    }
}

/// Like `load_or_init` but for an explicit path.
///
/// Only an existing file that cannot be read or parsed is an error; failing
/// to write the default file falls back to defaults.
pub fn load_or_init_at(path: &Path) -> Result<AvfConfig> {
    if !path.exists() {
        let default_cfg = AvfConfig::default();
        if let Err(e) = write_default(path, &default_cfg) {
            tracing::warn!(error = %format!("{e:#}"), "using built-in default config");
        } else {
            tracing::info!("created default config at {}", path.display());
        }
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: AvfConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &AvfConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create config directory: {}", parent.display()))?;
    }
    fs::write(path, toml)
        .with_context(|| format!("failed to write default config: {}", path.display()))?;
    Ok(())
}
