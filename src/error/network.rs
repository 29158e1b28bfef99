//! Network-related error types.
//!
//! Errors raised while opening a guidance request, before any body bytes
//! have been decoded.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String, message: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Malformed base URL or endpoint.
    InvalidUrl { url: String },

    /// Non-streaming response body could not be interpreted.
    InvalidResponse { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the guidance service. Please check your connection.".to_string()
            }
            NetworkError::Timeout { .. } => {
                "The guidance service took too long to respond.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The question could not be accepted. Please rephrase and try again."
                    .to_string(),
                404 => "The requested guru is not available.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The guidance service is experiencing issues. Please try again later."
                        .to_string()
                }
                _ => format!("The guidance service returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidUrl { url } => {
                format!("The guidance service address '{}' is not valid.", url)
            }
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the guidance service.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }

    /// Map a transport error raised while opening `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout {
                operation: format!("request to {}", url),
                message,
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation, message } => {
                write!(f, "{} timed out: {}", operation, message)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into an [`HttpError`].
pub fn classify_reqwest_error(err: &reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_connect() {
        HttpError::ConnectionFailed(err.to_string())
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else if err.is_body() || err.is_decode() {
        HttpError::Io(err.to_string())
    } else if let Some(status) = err.status() {
        HttpError::ServerError {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        HttpError::Other(err.to_string())
    }
}
