//! Error context for enriched error information.

/// Context attached to an error describing where it happened.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Guru the request was addressed to.
    pub guru: Option<String>,

    /// Endpoint URL involved, if any.
    pub endpoint: Option<String>,

    /// Correlation ID of the guidance session.
    pub session_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Self::default()
        }
    }

    pub fn with_guru(mut self, guru: impl Into<String>) -> Self {
        self.guru = Some(guru.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref guru) = self.guru {
            parts.push(format!("guru={}", guru));
        }
        if let Some(ref endpoint) = self.endpoint {
            parts.push(format!("endpoint={}", endpoint));
        }
        if let Some(ref session_id) = self.session_id {
            parts.push(format!("session_id={}", session_id));
        }

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref guru) = self.guru {
            write!(f, " guru={}", guru)?;
        }
        if let Some(ref endpoint) = self.endpoint {
            write!(f, " endpoint={}", endpoint)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = ErrorContext::new("stream_guidance")
            .with_guru("meditation")
            .with_endpoint("http://localhost:5000/api/spiritual/guidance/stream")
            .with_session_id("sess-1");

        assert_eq!(ctx.operation, "stream_guidance");
        assert_eq!(ctx.guru.as_deref(), Some("meditation"));
        assert_eq!(ctx.session_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn test_context_display_and_log_string() {
        let ctx = ErrorContext::new("ask").with_guru("karma");
        assert_eq!(ctx.to_string(), "[ask] guru=karma");
        assert_eq!(ctx.to_log_string(), "operation=ask guru=karma");
    }
}
