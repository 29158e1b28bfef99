use serde::{Deserialize, Serialize};

use crate::gurus::GuruKind;

/// Body of a guidance request, streamed or buffered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuidanceRequest {
    /// Which guru answers
    pub guru_type: GuruKind,
    /// The user's question, verbatim
    pub question: String,
    /// Optional caller-supplied context, sent as `null` when absent
    pub user_context: Option<serde_json::Value>,
    /// `Some(false)` on the buffered endpoint; omitted on the stream endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl GuidanceRequest {
    /// Create a request for the streaming endpoint
    pub fn new(guru_type: GuruKind, question: impl Into<String>) -> Self {
        Self {
            guru_type,
            question: question.into(),
            user_context: None,
            stream: None,
        }
    }

    pub fn with_user_context(mut self, context: serde_json::Value) -> Self {
        self.user_context = Some(context);
        self
    }

    /// Mark the request for the buffered (non-streaming) endpoint
    pub fn buffered(mut self) -> Self {
        self.stream = Some(false);
        self
    }
}

/// Body of a direct request to one guru's own endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuruPromptRequest {
    /// Fully assembled persona prompt
    pub prompt: String,
    pub question: String,
}
