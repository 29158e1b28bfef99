//! Server-Sent Events stream decoding
//!
//! Decodes a `data:`-framed stream of JSON events as it arrives:
//! - `data: <json>` - one event payload
//! - `data: [DONE]` - end of the logical stream
//! - Lines starting with `:` - comments (ignored)
//! - Any other field or a blank line - ignored
//!
//! # Module structure
//! - `events` - Decoded event, malformed-frame error, decoder state types
//! - `parser` - Pure line classification and payload parsing
//! - `decoder` - The incremental, chunk-invariant [`StreamDecoder`]
//! - `stream` - Async adapter pulling a transport body through a decoder

mod decoder;
mod events;
mod parser;
mod stream;
mod utf8;

pub use decoder::{CancelHandle, DecoderConfig, DecoderStats, StreamDecoder, DONE_SENTINEL};
pub use events::{
    CloseReason, DecodeResult, DecodedEvent, DecoderState, MalformedEventError, SseLine,
};
pub use parser::{parse_payload, parse_sse_line, parse_sse_line_with, DATA_FIELD};
pub use stream::{decode_stream, EventStream};
