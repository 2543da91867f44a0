//! Configuration management for ripper-http

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::error::{HttpError, Result};

/// Page load timeout in milliseconds.
pub const PAGE_TIMEOUT_KEY: &str = "page.timeout";
/// Number of attempts made for each request.
pub const DOWNLOAD_RETRIES_KEY: &str = "download.retries";
/// Proxy used for https targets, `[user:pass@]host:port`.
pub const HTTPS_PROXY_KEY: &str = "proxy.https";

pub const DEFAULT_TIMEOUT_MS: u64 = 5 * 1000;
pub const DEFAULT_RETRIES: u32 = 1;

/// HTTP method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Whether form data travels in the request body rather than the query string.
    pub fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        };
        write!(f, "{}", method)
    }
}

/// Key-value configuration store consulted when building requests.
pub trait ConfigProvider {
    /// Raw string value for `key`, if present.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Integer value for `key`, or `default` when absent or unparsable.
    fn get_integer(&self, key: &str, default: i64) -> i64 {
        match self.get_string(key) {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring non-integer value '{}' for {}", value, key);
                default
            }),
            None => default,
        }
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Configuration backed by a Java-style `.properties` file.
#[derive(Debug, Clone, Default)]
pub struct PropertiesConfig {
    values: HashMap<String, String>,
}

impl PropertiesConfig {
    /// Load and parse a properties file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    /// Set or replace a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromStr for PropertiesConfig {
    type Err = HttpError;

    /// Parse `key=value` / `key: value` lines. `#` and `!` start comments.
    fn from_str(s: &str) -> Result<Self> {
        let mut values = HashMap::new();
        for (index, raw) in s.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let split_at = line.find(['=', ':']).ok_or_else(|| {
                HttpError::Config(format!(
                    "Invalid property on line {}: '{}'. Expected 'key=value'",
                    index + 1,
                    line
                ))
            })?;
            let key = line[..split_at].trim();
            if key.is_empty() {
                return Err(HttpError::Config(format!(
                    "Missing property key on line {}",
                    index + 1
                )));
            }
            let value = line[split_at + 1..].trim();
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Self { values })
    }
}

impl ConfigProvider for PropertiesConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Request defaults resolved once from a [`ConfigProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub retries: u32,
    pub https_proxy: Option<String>,
    pub user_agent: String,
}

impl HttpSettings {
    /// Read timeout, retries and https proxy from `config`.
    ///
    /// Negative retries clamp to zero; a negative timeout falls back to the default.
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        let timeout_ms = config.get_integer(PAGE_TIMEOUT_KEY, DEFAULT_TIMEOUT_MS as i64);
        let timeout_ms = u64::try_from(timeout_ms).unwrap_or_else(|_| {
            warn!(
                "Negative {} ({}), using {}ms",
                PAGE_TIMEOUT_KEY, timeout_ms, DEFAULT_TIMEOUT_MS
            );
            DEFAULT_TIMEOUT_MS
        });
        let retries = config
            .get_integer(DOWNLOAD_RETRIES_KEY, DEFAULT_RETRIES as i64)
            .clamp(0, u32::MAX as i64) as u32;

        Self {
            timeout: Duration::from_millis(timeout_ms),
            retries,
            https_proxy: config.get_string(HTTPS_PROXY_KEY),
            ..Self::default()
        }
    }

    /// Replace the identifying user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retries: DEFAULT_RETRIES,
            https_proxy: None,
            user_agent: format!("ripper-http/{}", crate::VERSION),
        }
    }
}
