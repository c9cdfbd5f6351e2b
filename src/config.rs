use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpSettings,
}

/// Endpoints and language for the catalog. Injected into the fetch layer and the
/// projector instead of living in constants.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Catalog API root, e.g. `https://api.mangadex.org`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Cover host root; covers live at `{cover_base_url}/{manga_id}/{file}`
    #[serde(default = "default_cover_base_url")]
    pub cover_base_url: String,

    /// The single language chapters and titles are selected for
    #[serde(default = "default_language")]
    pub target_language: String,

    /// Page size for search, browse and feed requests
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Hard stop for feed pagination
    #[serde(default = "default_max_offset")]
    pub max_offset: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    /// Maximum number of retry attempts for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_ms: u64,

    /// Timeout for HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Delay between paginated requests in milliseconds
    #[serde(default = "default_rate_limit")]
    pub rate_limit_delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base_url() -> String { "https://api.mangadex.org".to_string() }
fn default_cover_base_url() -> String { "https://uploads.mangadex.org/covers".to_string() }
fn default_language() -> String { "en".to_string() }
fn default_page_limit() -> u32 { 100 }
fn default_max_offset() -> u32 { 10_000 }
fn default_max_retries() -> usize { 4 }
fn default_initial_retry_delay() -> u64 { 500 }
fn default_max_retry_delay() -> u64 { 8000 }
fn default_timeout() -> u64 { 30 }
fn default_rate_limit() -> u64 { 250 }
fn default_user_agent() -> String { concat!("rust_manga_catalog/", env!("CARGO_PKG_VERSION")).to_string() }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            cover_base_url: default_cover_base_url(),
            target_language: default_language(),
            page_limit: default_page_limit(),
            max_offset: default_max_offset(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay(),
            max_retry_delay_ms: default_max_retry_delay(),
            timeout_secs: default_timeout(),
            rate_limit_delay_ms: default_rate_limit(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Read `config.toml` from the working directory, falling back to defaults.
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<Config>(content)?)
    }
}

impl HttpSettings {
    /// Build the retrying HTTP client from these settings
    pub fn create_http_client(&self) -> Result<crate::http_client::HttpClient, reqwest::Error> {
        use crate::http_client::{HttpClient, HttpClientConfig};
        use std::time::Duration;

        let config = HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            initial_retry_delay_ms: self.initial_retry_delay_ms,
            max_retry_delay_ms: self.max_retry_delay_ms,
            rate_limit_delay_ms: self.rate_limit_delay_ms,
            user_agent: self.user_agent.clone(),
        };

        HttpClient::with_config(config)
    }
}
