//! SSE event types and definitions
//!
//! Contains the decoded event wrapper, the per-frame malformed payload error,
//! and the decoder state machine types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Data payload (e.g., "data: {\"text\": \"hello\"}")
    Data(String),
    /// Any other `name: value` field (e.g., "event: content", "id: 7")
    Field { name: String, value: String },
    /// Empty line
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// A structured event decoded from one `data:` frame.
///
/// The payload is kept as an uninterpreted JSON value; callers that know the
/// shape of their backend's events can deserialize it with [`DecodedEvent::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedEvent(serde_json::Value);

impl DecodedEvent {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the JSON payload.
    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_payload(self) -> serde_json::Value {
        self.0
    }

    /// Deserialize the payload into a caller-defined type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }

    /// Returns the first string found under one of the given top-level keys.
    ///
    /// Guidance backends disagree on the key for streamed text (`content`,
    /// `text`, `delta`), so renderers probe a short list.
    pub fn text_field(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.0.get(*key).and_then(|v| v.as_str()))
    }
}

impl From<serde_json::Value> for DecodedEvent {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A `data:` frame whose payload was not valid JSON.
///
/// This is a per-frame soft failure: the decoder reports it in place of the
/// event and keeps decoding subsequent frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed event payload ({reason}): {payload}")]
pub struct MalformedEventError {
    /// The raw payload text exactly as received after the field prefix
    pub payload: String,
    /// Parser message describing why the payload was rejected
    pub reason: String,
}

impl MalformedEventError {
    pub fn new(payload: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            reason: reason.into(),
        }
    }
}

/// One item produced by the decoder.
pub type DecodeResult = Result<DecodedEvent, MalformedEventError>;

/// Why a decoder stopped accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The termination sentinel was observed in the stream
    Sentinel,
    /// The transport ended and `finish` flushed the remainder
    Finished,
    /// The consumer abandoned the stream
    Cancelled,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Sentinel => "sentinel",
            CloseReason::Finished => "finished",
            CloseReason::Cancelled => "cancelled",
        }
    }
}

/// Decoder lifecycle state. `Open -> Closed` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Open,
    Closed(CloseReason),
}

impl DecoderState {
    pub fn is_open(&self) -> bool {
        matches!(self, DecoderState::Open)
    }
}
