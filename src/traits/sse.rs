//! Event stream decoder trait abstraction.
//!
//! Provides a trait-based abstraction over the stream decoder, so the
//! transport pull loop and tests can be written against any implementation.

use crate::sse::{CancelHandle, DecodeResult, StreamDecoder};

/// Trait for incremental event stream decoding.
///
/// A decoder is stateful and single-owner: it receives raw body fragments in
/// transport order and returns the items each one completed. Once closed,
/// every method is a no-op.
///
/// # Example
///
/// ```ignore
/// use guru_stream::traits::EventDecoder;
///
/// fn pump<D: EventDecoder>(decoder: &mut D, chunk: &[u8]) {
///     for item in decoder.feed(chunk) {
///         match item {
///             Ok(event) => render(event),
///             Err(malformed) => eprintln!("skipped update: {}", malformed),
///         }
///     }
/// }
/// ```
pub trait EventDecoder: Send {
    /// Feed the next raw fragment.
    ///
    /// # Returns
    /// Every event (or malformed frame) completed by this fragment, in order
    fn feed(&mut self, fragment: &[u8]) -> Vec<DecodeResult>;

    /// Signal natural end of the transport and flush any partial line.
    fn finish(&mut self) -> Vec<DecodeResult>;

    /// Abandon the stream, discarding buffered input.
    fn cancel(&mut self);

    /// Whether the decoder has stopped accepting input.
    fn is_closed(&self) -> bool;

    /// Handle that can cancel this decoder from another task.
    fn cancel_handle(&self) -> CancelHandle;
}

impl EventDecoder for StreamDecoder {
    fn feed(&mut self, fragment: &[u8]) -> Vec<DecodeResult> {
        StreamDecoder::feed(self, fragment)
    }

    fn finish(&mut self) -> Vec<DecodeResult> {
        StreamDecoder::finish(self)
    }

    fn cancel(&mut self) {
        StreamDecoder::cancel(self)
    }

    fn is_closed(&self) -> bool {
        StreamDecoder::is_closed(self)
    }

    fn cancel_handle(&self) -> CancelHandle {
        StreamDecoder::cancel_handle(self)
    }
}
