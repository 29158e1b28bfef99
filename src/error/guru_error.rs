//! Unified error type for guidance operations.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::sse::MalformedEventError;
use crate::traits::HttpError;

/// Unified error type for the crate.
///
/// `GuruError` consolidates the domain-specific error types so callers get
/// uniform categorization, retry decisions, and user-facing messages.
#[derive(Debug)]
pub enum GuruError {
    /// Request-phase errors (connect, HTTP status, timeouts).
    Network(NetworkError),

    /// Errors raised while reading and decoding a stream.
    Stream(StreamError),

    /// Invalid configuration.
    Config(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<GuruError>,
        context: ErrorContext,
    },
}

impl GuruError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GuruError::Network(NetworkError::HttpStatus { status, .. }) if *status < 500 => {
                ErrorCategory::User
            }
            GuruError::Network(NetworkError::InvalidUrl { .. }) => ErrorCategory::Configuration,
            GuruError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            GuruError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Server,
            GuruError::Network(NetworkError::Cancelled) => ErrorCategory::User,
            GuruError::Network(_) => ErrorCategory::Network,
            GuruError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } | StreamError::Timeout { .. } => {
                    ErrorCategory::Network
                }
                StreamError::Other { .. } => ErrorCategory::Server,
                StreamError::MalformedEvent(_) => ErrorCategory::Client,
                StreamError::Cancelled => ErrorCategory::User,
            },
            GuruError::Config(_) => ErrorCategory::Configuration,
            GuruError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            GuruError::Network(err) => err.is_retryable(),
            GuruError::Stream(err) => err.is_retryable(),
            GuruError::Config(_) => false,
            GuruError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Whether a stream yielding this error ends afterwards.
    ///
    /// Only a malformed single update is non-fatal.
    pub fn is_fatal(&self) -> bool {
        match self.inner() {
            GuruError::Stream(err) => err.is_fatal(),
            _ => true,
        }
    }

    /// The malformed frame, if this error reports one.
    pub fn as_malformed(&self) -> Option<&MalformedEventError> {
        match self.inner() {
            GuruError::Stream(StreamError::MalformedEvent(err)) => Some(err),
            _ => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            GuruError::Network(err) => err.user_message(),
            GuruError::Stream(err) => err.user_message(),
            GuruError::Config(err) => format!("Configuration problem: {}", err),
            GuruError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GuruError::Network(err) => err.error_code(),
            GuruError::Stream(err) => err.error_code(),
            GuruError::Config(err) => err.error_code(),
            GuruError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        GuruError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            GuruError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &GuruError {
        match self {
            GuruError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for GuruError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuruError::Network(err) => write!(f, "{}", err),
            GuruError::Stream(err) => write!(f, "{}", err),
            GuruError::Config(err) => write!(f, "{}", err),
            GuruError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for GuruError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuruError::Network(err) => Some(err),
            GuruError::Stream(err) => Some(err),
            GuruError::Config(err) => Some(err),
            GuruError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for GuruError {
    fn from(err: NetworkError) -> Self {
        GuruError::Network(err)
    }
}

impl From<StreamError> for GuruError {
    fn from(err: StreamError) -> Self {
        GuruError::Stream(err)
    }
}

impl From<ConfigError> for GuruError {
    fn from(err: ConfigError) -> Self {
        GuruError::Config(err)
    }
}

impl From<MalformedEventError> for GuruError {
    fn from(err: MalformedEventError) -> Self {
        GuruError::Stream(StreamError::MalformedEvent(err))
    }
}

impl From<HttpError> for GuruError {
    fn from(err: HttpError) -> Self {
        GuruError::Network(NetworkError::from_http(err, "unknown"))
    }
}

impl From<serde_json::Error> for GuruError {
    fn from(err: serde_json::Error) -> Self {
        GuruError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for GuruError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let http = super::network::classify_reqwest_error(&err);
        GuruError::Network(NetworkError::from_http(http, &url))
    }
}
