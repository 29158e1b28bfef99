//! Streaming-related error types.
//!
//! Errors raised while a guidance stream is being read and decoded.

use std::fmt;

use crate::sse::MalformedEventError;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// One frame carried a payload that is not valid JSON. Non-fatal:
    /// the stream continues with the next frame.
    MalformedEvent(MalformedEventError),

    /// The transport failed mid-stream.
    ConnectionLost { message: String },

    /// The transport timed out mid-stream.
    Timeout { message: String },

    /// The consumer abandoned the stream.
    Cancelled,

    /// Generic stream error.
    Other { message: String },
}

impl StreamError {
    /// Whether the stream ends after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StreamError::MalformedEvent(_))
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::ConnectionLost { .. } | StreamError::Timeout { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::MalformedEvent(_) => {
                "One guidance update could not be read and was skipped.".to_string()
            }
            StreamError::ConnectionLost { .. } => {
                "Could not complete the guidance: the connection was lost.".to_string()
            }
            StreamError::Timeout { .. } => {
                "Could not complete the guidance: the service stopped responding.".to_string()
            }
            StreamError::Cancelled => "Guidance cancelled.".to_string(),
            StreamError::Other { message } => {
                format!("Could not complete the guidance: {}", message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::MalformedEvent(_) => "E_STREAM_MALFORMED",
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN_LOST",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::Cancelled => "E_STREAM_CANCEL",
            StreamError::Other { .. } => "E_STREAM_OTHER",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::MalformedEvent(err) => write!(f, "{}", err),
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::Timeout { message } => write!(f, "Stream timeout: {}", message),
            StreamError::Cancelled => write!(f, "Stream cancelled"),
            StreamError::Other { message } => write!(f, "Stream error: {}", message),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::MalformedEvent(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MalformedEventError> for StreamError {
    fn from(err: MalformedEventError) -> Self {
        StreamError::MalformedEvent(err)
    }
}
