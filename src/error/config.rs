//! Configuration error types.

use thiserror::Error;

/// Invalid or unreadable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL is empty or not http(s)
    #[error("invalid base URL '{0}': expected an http:// or https:// address")]
    InvalidBaseUrl(String),

    /// A timeout was configured as zero
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },

    /// An environment variable held an unparsable value
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The requested guru does not exist
    #[error("unknown guru type '{0}'")]
    UnknownGuru(String),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidBaseUrl(_) => "E_CFG_URL",
            ConfigError::ZeroTimeout { .. } => "E_CFG_TIMEOUT",
            ConfigError::InvalidEnv { .. } => "E_CFG_ENV",
            ConfigError::UnknownGuru(_) => "E_CFG_GURU",
        }
    }
}
