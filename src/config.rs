//! Client configuration.
//!
//! [`GuidanceConfig`] holds everything needed to reach the guidance backend.
//! Build it with the `with_*` methods or read it from the environment.

use std::time::Duration;

use crate::error::ConfigError;
use crate::gurus::GuruKind;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub const ENV_API_URL: &str = "GURU_API_URL";
pub const ENV_DEFAULT_GURU: &str = "GURU_DEFAULT";
pub const ENV_CONNECT_TIMEOUT: &str = "GURU_CONNECT_TIMEOUT_SECS";
pub const ENV_REQUEST_TIMEOUT: &str = "GURU_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG: &str = "GURU_LOG";

/// Configuration for a [`GuidanceClient`](crate::guidance::GuidanceClient).
///
/// # Example
///
/// ```ignore
/// use guru_stream::config::GuidanceConfig;
/// use guru_stream::gurus::GuruKind;
///
/// let config = GuidanceConfig::default()
///     .with_base_url("https://guidance.example.org")
///     .with_default_guru(GuruKind::Meditation);
/// config.validate()?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Guru used when a request does not name one
    pub default_guru: GuruKind,
    /// TCP/TLS connect timeout (default: 10s)
    pub connect_timeout: Duration,
    /// Overall request timeout; `None` lets streams run as long as needed
    pub request_timeout: Option<Duration>,
    /// Default log filter when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_guru: GuruKind::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            log_level: "info".to_string(),
        }
    }
}

impl GuidanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_guru(mut self, guru: GuruKind) -> Self {
        self.default_guru = guru;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Create config from the `GURU_*` environment variables.
    ///
    /// Unset variables keep their defaults; set but unparsable ones are an
    /// error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_base_url(url);
        }
        if let Some(guru) = lookup(ENV_DEFAULT_GURU) {
            config.default_guru = guru.parse().map_err(|e: ConfigError| ConfigError::InvalidEnv {
                var: ENV_DEFAULT_GURU,
                value: guru.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(secs) = lookup(ENV_CONNECT_TIMEOUT) {
            config.connect_timeout = parse_secs(ENV_CONNECT_TIMEOUT, &secs)?;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            config.request_timeout = Some(parse_secs(ENV_REQUEST_TIMEOUT, &secs)?);
        }
        if let Some(level) = lookup(ENV_LOG) {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.as_str();
        let has_scheme = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|host| !host.is_empty());
        if !has_scheme {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: "connect_timeout",
            });
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeout {
                name: "request_timeout",
            });
        }
        Ok(())
    }

    /// Join an API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
