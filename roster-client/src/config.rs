//! Client configuration

use crate::{ClientError, ClientResult};

/// Client configuration for connecting to the roster service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:2200")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Page size list screens start with
    pub page_size: u32,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    /// Emit JSON logs instead of the pretty console format
    pub log_json: bool,

    /// Directory for rotating log files (console only when unset)
    pub log_dir: Option<String>,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:2200";
    pub const DEFAULT_PAGE_SIZE: u32 = 5;

    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            page_size: Self::DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
            log_json: false,
            log_dir: None,
        }
    }

    /// Load configuration from the environment (reads `.env` first)
    ///
    /// | variable | default |
    /// |---|---|
    /// | `ROSTER_API_URL` | `http://localhost:2200` |
    /// | `ROSTER_TIMEOUT_SECS` | `30` |
    /// | `ROSTER_PAGE_SIZE` | `5` |
    /// | `ROSTER_LOG_LEVEL` | `info` |
    /// | `ROSTER_LOG_JSON` | `false` |
    /// | `ROSTER_LOG_DIR` | unset |
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::new(var("ROSTER_API_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.into()));

        if let Some(raw) = var("ROSTER_TIMEOUT_SECS") {
            config.timeout = parse_number("ROSTER_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = var("ROSTER_PAGE_SIZE") {
            let size: u32 = parse_number("ROSTER_PAGE_SIZE", &raw)?;
            if size == 0 {
                return Err(ClientError::Config("ROSTER_PAGE_SIZE must be at least 1".into()));
            }
            config.page_size = size;
        }
        if let Some(level) = var("ROSTER_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(raw) = var("ROSTER_LOG_JSON") {
            config.log_json = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        config.log_dir = var("ROSTER_LOG_DIR");

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the initial page size (at least 1)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the log directory
    pub fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<super::NetworkHttpClient> {
        super::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> ClientResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{name} must be a number, got {raw:?}")))
}
