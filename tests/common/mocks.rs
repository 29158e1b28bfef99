//! Mock implementations for test fixtures.
//!
//! Re-exports the mock transport from `guru_stream::adapters::mock` and adds
//! a builder for common backend setups.

pub use guru_stream::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use guru_stream::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;
use guru_stream::guidance::{GUIDANCE_PATH, HEALTH_PATH, STREAM_PATH};

pub const MOCK_BASE: &str = "http://localhost:5000";

/// Configuration for setting up mock backend responses.
pub struct MockBackend {
    client: MockHttpClient,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Streaming endpoint returns `chunks` and ends.
    pub fn with_stream<I, S>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client.set_response(
            &format!("{}{}", MOCK_BASE, STREAM_PATH),
            MockResponse::chunks(chunks),
        );
        self
    }

    /// Streaming endpoint returns prepared byte chunks and ends.
    pub fn with_stream_bytes(self, chunks: Vec<Bytes>) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_BASE, STREAM_PATH),
            MockResponse::Stream(chunks),
        );
        self
    }

    /// Streaming endpoint returns `chunks`, then fails.
    pub fn with_broken_stream(self, chunks: Vec<Bytes>, err: HttpError) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_BASE, STREAM_PATH),
            MockResponse::StreamThenError(chunks, err),
        );
        self
    }

    /// Buffered guidance endpoint returns `json` with `status`.
    pub fn with_guidance(self, status: u16, json: &str) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_BASE, GUIDANCE_PATH),
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    pub fn with_health(self, status: u16) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_BASE, HEALTH_PATH),
            MockResponse::Success(Response::new(status, Bytes::from_static(b"{}"))),
        );
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}
