//! Mock implementations for testing.
//!
//! Lets the guidance client be exercised without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
