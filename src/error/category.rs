//! Error category classification.
//!
//! A coarse classification used to pick a retry policy and the message shown
//! to the person waiting on the guidance stream.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, or a stream cut off mid-read.
    /// Generally transient and retryable.
    Network,

    /// Backend errors (HTTP 5xx, backend closed the stream early).
    /// Generally transient and retryable after delay.
    Server,

    /// The backend sent something this client cannot decode.
    /// Not retryable.
    Client,

    /// Invalid input or cancelled by the user.
    User,

    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Server => "Guidance service issue",
            ErrorCategory::Client => "Unexpected response format",
            ErrorCategory::User => "User action required",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => {
                "The guidance service may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "Please report this issue if it persists",
            ErrorCategory::User => "Please check your question and try again",
            ErrorCategory::Configuration => "Check GURU_API_URL and the other GURU_* settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
