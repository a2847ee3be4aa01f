//! Explorer configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). The resulting [`ExplorerConfig`] is passed explicitly to
//! [`crate::api::DishClient::new`] and the controller; nothing here is
//! process-global.

use std::time::Duration;

use crate::error::ExplorerError;

/// Default REST endpoint of the dish catalog.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Placeholder `Authorization` header value.
pub const DEFAULT_AUTH_TOKEN: &str = "your-auth-token-here";

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level explorer configuration.
///
/// Loaded once at startup via [`ExplorerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Base URL every request path is appended to, without trailing slash.
    pub base_url: String,

    /// Static `Authorization` header value sent on every request.
    pub auth_token: String,

    /// Path of the name-suggestion endpoint, relative to `base_url`.
    pub suggestion_path: String,

    /// Number of dishes per page.
    pub page_limit: u32,

    /// Quiet window before a suggestion lookup fires.
    pub suggestion_debounce: Duration,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Capacity of the view event broadcast channel.
    pub event_bus_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            suggestion_path: "/dish/suggestions".to_string(),
            page_limit: 10,
            suggestion_debounce: Duration::from_millis(300),
            request_timeout: Duration::from_secs(10),
            event_bus_capacity: 256,
            log_format: LogFormat::Text,
        }
    }
}

impl ExplorerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the [`Default`] values when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::InvalidConfig`] if `API_BASE_URL` is not an
    /// `http(s)` URL or `PAGE_LIMIT` or `REQUEST_TIMEOUT_SECS` is zero.
    pub fn from_env() -> Result<Self, ExplorerError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let base_url = std::env::var("API_BASE_URL").unwrap_or(defaults.base_url);
        let auth_token = std::env::var("API_AUTH_TOKEN").unwrap_or(defaults.auth_token);
        let suggestion_path =
            std::env::var("SUGGESTION_PATH").unwrap_or(defaults.suggestion_path);

        let page_limit = parse_env("PAGE_LIMIT", defaults.page_limit);
        let suggestion_debounce = Duration::from_millis(parse_env(
            "SUGGESTION_DEBOUNCE_MS",
            u64::try_from(defaults.suggestion_debounce.as_millis()).unwrap_or(u64::MAX),
        ));
        let request_timeout = Duration::from_secs(parse_env(
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        ));
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity);

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            base_url,
            auth_token,
            suggestion_path,
            page_limit,
            suggestion_debounce,
            request_timeout,
            event_bus_capacity,
            log_format,
        }
        .validated()
    }

    /// Normalizes and checks the configuration.
    ///
    /// Strips a trailing `/` from `base_url` and ensures `suggestion_path`
    /// starts with one.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::InvalidConfig`] on a non-HTTP base URL or
    /// when the page limit, event bus capacity or request timeout is zero.
    pub fn validated(mut self) -> Result<Self, ExplorerError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ExplorerError::InvalidConfig(format!(
                "API_BASE_URL must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if !self.suggestion_path.starts_with('/') {
            self.suggestion_path.insert(0, '/');
        }
        if self.page_limit == 0 {
            return Err(ExplorerError::InvalidConfig(
                "PAGE_LIMIT must be at least 1".to_string(),
            ));
        }
        if self.event_bus_capacity == 0 {
            return Err(ExplorerError::InvalidConfig(
                "EVENT_BUS_CAPACITY must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ExplorerError::InvalidConfig(
                "REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
