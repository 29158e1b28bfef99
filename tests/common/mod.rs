//! Common test utilities for integration tests.
//!
//! Fixtures for building `data:`-framed bodies, chunking them in different
//! ways, and pointing a client at a test backend.
//!
//! # Example
//!
//! ```ignore
//! use common::{sse_body, split_every};
//!
//! let body = sse_body(&[json!({"content": "Breathe"})], true);
//! let chunks = split_every(body.as_bytes(), 3);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use bytes::Bytes;
use guru_stream::config::GuidanceConfig;
use guru_stream::sse::{DecodeResult, StreamDecoder};
use serde_json::Value;

/// Frame `events` as `data:` lines, optionally followed by `[DONE]`.
pub fn sse_body(events: &[Value], done: bool) -> String {
    let mut body: String = events
        .iter()
        .map(|event| format!("data: {}\n\n", event))
        .collect();
    if done {
        body.push_str("data: [DONE]\n\n");
    }
    body
}

/// Split `bytes` into chunks of at most `size` bytes.
pub fn split_every(bytes: &[u8], size: usize) -> Vec<Bytes> {
    bytes
        .chunks(size.max(1))
        .map(Bytes::copy_from_slice)
        .collect()
}

/// Split `bytes` at pseudo-random offsets derived from `seed`.
pub fn split_seeded(bytes: &[u8], seed: u64) -> Vec<Bytes> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let len = 1 + (state >> 59) as usize;
        let end = (start + len).min(bytes.len());
        chunks.push(Bytes::copy_from_slice(&bytes[start..end]));
        start = end;
    }
    chunks
}

/// Feed every chunk into a fresh decoder, then finish it.
pub fn decode_all(chunks: &[Bytes]) -> Vec<DecodeResult> {
    let mut decoder = StreamDecoder::new();
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.feed(chunk));
    }
    out.extend(decoder.finish());
    out
}

/// Config pointing at a test server.
pub fn config_for(base_url: &str) -> GuidanceConfig {
    GuidanceConfig::default().with_base_url(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sse_body() {
        assert_eq!(
            sse_body(&[json!({"a": 1})], true),
            "data: {\"a\":1}\n\ndata: [DONE]\n\n"
        );
    }

    #[test]
    fn test_split_seeded_covers_input() {
        let input = b"data: {\"content\":\"hello\"}\n";
        let joined: Vec<u8> = split_seeded(input, 7).concat();
        assert_eq!(joined, input.to_vec());
    }
}
