use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Development hostname rewrite applied to asset URLs (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRewrite {
    /// Hostname as it appears in URLs returned by the content API.
    pub from: String,
    /// Canonical hostname it is rewritten to.
    pub to: String,
}

impl Default for HostRewrite {
    fn default() -> Self {
        Self {
            from: "127.0.0.1".to_string(),
            to: "localhost".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/cbweb/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the content API, without trailing slash.
    pub api_base_url: String,
    /// Optional connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-request timeout in seconds (None = wait indefinitely).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Gallery lists shorter than this are padded by cycling (None = no padding).
    #[serde(default = "default_gallery_pad_len")]
    pub gallery_pad_len: Option<usize>,
    /// Development hostname rewrite for asset URLs. Omit the section to keep the default.
    #[serde(default = "default_dev_host_rewrite")]
    pub dev_host_rewrite: Option<HostRewrite>,
}

fn default_gallery_pad_len() -> Option<usize> {
    Some(4)
}

fn default_dev_host_rewrite() -> Option<HostRewrite> {
    Some(HostRewrite::default())
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001/api".to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            gallery_pad_len: default_gallery_pad_len(),
            dev_host_rewrite: default_dev_host_rewrite(),
        }
    }
}

impl SiteConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Base URL with any trailing slash removed, ready for `{base}{path}` joins.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cbweb")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SiteConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SiteConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<SiteConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SiteConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
