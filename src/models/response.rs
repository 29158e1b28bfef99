use serde::{Deserialize, Serialize};

use super::deserialize_optional_id;

/// Buffered answer from the guidance backend.
///
/// Backends are inconsistent about which fields they fill, so everything
/// except `success` is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuidanceResponse {
    /// `false` when the backend reports a handled failure
    #[serde(default = "default_success")]
    pub success: bool,
    /// Display name of the answering guru
    #[serde(default)]
    pub guru_name: Option<String>,
    /// Guidance text
    #[serde(default)]
    pub response: Option<String>,
    /// Failure description (sent as `error` or `message`)
    #[serde(default, alias = "message")]
    pub error: Option<String>,
    /// Backend session identifier (string or integer on the wire)
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub session_id: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "ok")
    }
}
