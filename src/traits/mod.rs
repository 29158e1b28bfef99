//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming POST)
//! - [`EventDecoder`] - Incremental event stream decoding

pub mod http;
pub mod sse;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use sse::EventDecoder;
