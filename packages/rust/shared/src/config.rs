//! Application configuration for the Vanguard site client.
//!
//! User config lives at `~/.vanguard/vanguard.toml`.
//! CLI flags (and `VANGUARD_BACKEND_URL`) override config file values,
//! which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VanguardError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "vanguard.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".vanguard";

// ---------------------------------------------------------------------------
// Config structs (matching vanguard.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content API and featured-insights settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Contact webhook settings.
    #[serde(default)]
    pub contact: ContactConfig,

    /// Content library listing settings.
    #[serde(default)]
    pub library: LibraryConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base URL of the internal content API (`/api/...` is appended).
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// RSS-to-JSON proxy endpoint.
    #[serde(default = "default_rss_proxy_url")]
    pub rss_proxy_url: String,

    /// Blog feed passed to the proxy as `rss_url`.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Month (1-12) of the post to feature from the feed.
    #[serde(default = "default_featured_month")]
    pub featured_month: u32,

    /// Day of month of the post to feature from the feed.
    #[serde(default = "default_featured_day")]
    pub featured_day: u32,

    /// Maximum excerpt length in characters before the ellipsis.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            rss_proxy_url: default_rss_proxy_url(),
            feed_url: default_feed_url(),
            featured_month: default_featured_month(),
            featured_day: default_featured_day(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8001".into()
}
fn default_rss_proxy_url() -> String {
    "https://api.rss2json.com/v1/api.json".into()
}
fn default_feed_url() -> String {
    "https://kenbanta.substack.com/feed".into()
}
fn default_featured_month() -> u32 {
    11
}
fn default_featured_day() -> u32 {
    6
}
fn default_excerpt_chars() -> usize {
    150
}

/// `[contact]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Automation webhook receiving contact submissions.
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,

    /// Static `source` value attached to every submission.
    #[serde(default = "default_source_label")]
    pub source_label: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
            source_label: default_source_label(),
        }
    }
}

fn default_webhook_url() -> String {
    "https://hooks.zapier.com/hooks/catch/vanguard/contact/".into()
}
fn default_source_label() -> String {
    "The Vanguard Network Contact Form".into()
}

/// `[library]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Cards per page in library listings.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    30
}

impl AppConfig {
    /// Replace the backend URL (CLI flag / env override).
    pub fn with_backend_url(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url {
            self.content.backend_url = url;
        }
        self
    }

    /// Check the values that would otherwise fail late, mid-request.
    pub fn validate(&self) -> Result<()> {
        parse_http_url("content.backend_url", &self.content.backend_url)?;
        parse_http_url("content.rss_proxy_url", &self.content.rss_proxy_url)?;
        parse_http_url("content.feed_url", &self.content.feed_url)?;
        parse_http_url("contact.webhook_url", &self.contact.webhook_url)?;

        if !(1..=12).contains(&self.content.featured_month) {
            return Err(VanguardError::config(format!(
                "content.featured_month must be 1-12, got {}",
                self.content.featured_month
            )));
        }
        if !(1..=31).contains(&self.content.featured_day) {
            return Err(VanguardError::config(format!(
                "content.featured_day must be 1-31, got {}",
                self.content.featured_day
            )));
        }
        if self.content.excerpt_chars == 0 {
            return Err(VanguardError::config("content.excerpt_chars must be > 0"));
        }
        if self.library.page_size == 0 {
            return Err(VanguardError::config("library.page_size must be > 0"));
        }
        Ok(())
    }
}

/// Parse `value` as an absolute http(s) URL, naming `field` on failure.
pub fn parse_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| VanguardError::config(format!("{field}: invalid URL '{value}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(VanguardError::config(format!(
            "{field}: unsupported scheme '{other}' (expected http or https)"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.vanguard/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| VanguardError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.vanguard/vanguard.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VanguardError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| VanguardError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| VanguardError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| VanguardError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| VanguardError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
