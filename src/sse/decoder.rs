//! Stateful stream decoder.
//!
//! [`StreamDecoder`] accepts raw body fragments as they arrive from the
//! transport, reassembles lines across fragment boundaries, and emits one
//! [`DecodeResult`] per `data:` frame until the termination sentinel, the end
//! of the transport, or a cancellation closes it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::sse::events::{CloseReason, DecodeResult, DecoderState, SseLine};
use crate::sse::parser::{parse_payload, parse_sse_line_with, DATA_FIELD};
use crate::sse::utf8::Utf8Accumulator;

/// Payload marking the logical end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Wire-format parameters for a [`StreamDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Field name whose value carries event payloads
    pub field: String,
    /// Payload that terminates the stream (matched exactly)
    pub sentinel: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            field: DATA_FIELD.to_string(),
            sentinel: DONE_SENTINEL.to_string(),
        }
    }
}

impl DecoderConfig {
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }
}

/// Cross-thread cancellation for a [`StreamDecoder`].
///
/// Cloning is cheap and every clone controls the same decoder. Calling
/// [`CancelHandle::cancel`] only flips a flag; the decoder notices it before
/// emitting its next line and drops its buffer at that point. Async readers
/// can park on [`CancelHandle::cancelled`] to stop waiting on an idle
/// transport.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once [`CancelHandle::cancel`] has been called on any clone.
    pub async fn cancelled(&self) {
        // Register before checking the flag so a concurrent cancel is not lost.
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Counters describing what a decoder has seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Well-formed events emitted
    pub events: u64,
    /// Frames reported as malformed
    pub malformed: u64,
    /// Lines skipped because they were not payload frames
    pub ignored: u64,
}

/// Incremental decoder for a `data:`-framed JSON event stream.
#[derive(Debug)]
pub struct StreamDecoder {
    config: DecoderConfig,
    state: DecoderState,
    /// Decoded text not yet resolved into a complete line
    buffer: String,
    /// Prefix length of `buffer` already searched for a newline
    scanned: usize,
    utf8: Utf8Accumulator,
    cancel: CancelHandle,
    stats: DecoderStats,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder {
    /// Create a decoder for `data:` frames terminated by `[DONE]`.
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            state: DecoderState::Open,
            buffer: String::new(),
            scanned: 0,
            utf8: Utf8Accumulator::new(),
            cancel: CancelHandle::new(),
            stats: DecoderStats::default(),
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Feed the next raw fragment, returning every item it completed.
    pub fn feed(&mut self, fragment: impl AsRef<[u8]>) -> Vec<DecodeResult> {
        let mut out = Vec::new();
        self.feed_with(fragment, |item| out.push(item));
        out
    }

    /// Feed the next raw fragment, handing each completed item to `sink`
    /// synchronously and in stream order.
    pub fn feed_with<F>(&mut self, fragment: impl AsRef<[u8]>, mut sink: F)
    where
        F: FnMut(DecodeResult),
    {
        if self.observe_cancel() || !self.state.is_open() {
            return;
        }

        self.utf8.decode_into(fragment.as_ref(), &mut self.buffer);
        self.drain_lines(&mut sink);
    }

    /// Signal natural end of the transport and flush a trailing partial line.
    pub fn finish(&mut self) -> Vec<DecodeResult> {
        let mut out = Vec::new();
        self.finish_with(|item| out.push(item));
        out
    }

    /// Callback form of [`StreamDecoder::finish`].
    pub fn finish_with<F>(&mut self, mut sink: F)
    where
        F: FnMut(DecodeResult),
    {
        if self.observe_cancel() || !self.state.is_open() {
            return;
        }

        self.utf8.flush_into(&mut self.buffer);
        // Complete lines were drained by `feed`, so at most one partial line remains
        let remainder = std::mem::take(&mut self.buffer);
        if !remainder.is_empty() {
            tracing::debug!(bytes = remainder.len(), "flushing unterminated final line");
            self.process_line(&remainder, &mut sink);
        }

        self.close(CloseReason::Finished);
    }

    /// Abandon the stream: close immediately and discard buffered input.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.close(CloseReason::Cancelled);
    }

    /// Handle for cancelling this decoder from another thread or task.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Return to `Open` with empty buffers. Previously issued cancel handles
    /// no longer affect this decoder.
    pub fn restart(&mut self) {
        self.state = DecoderState::Open;
        self.buffer.clear();
        self.scanned = 0;
        self.utf8.clear();
        self.cancel = CancelHandle::new();
        self.stats = DecoderStats::default();
    }

    pub fn state(&self) -> DecoderState {
        if self.state.is_open() && self.cancel.is_cancelled() {
            return DecoderState::Closed(CloseReason::Cancelled);
        }
        self.state
    }

    pub fn is_closed(&self) -> bool {
        !self.state().is_open()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        match self.state() {
            DecoderState::Open => None,
            DecoderState::Closed(reason) => Some(reason),
        }
    }

    /// Bytes held back waiting for a newline or the rest of a code point.
    pub fn pending_len(&self) -> usize {
        self.buffer.len() + self.utf8.pending()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    fn drain_lines<F>(&mut self, sink: &mut F)
    where
        F: FnMut(DecodeResult),
    {
        let buffer = std::mem::take(&mut self.buffer);
        let mut consumed = 0;
        let mut search_from = self.scanned;

        while self.state.is_open() {
            if self.observe_cancel() {
                break;
            }
            let Some(pos) = buffer[search_from..].find('\n') else {
                break;
            };
            let end = search_from + pos;
            self.process_line(&buffer[consumed..end], sink);
            consumed = end + 1;
            search_from = consumed;
        }

        if self.state.is_open() {
            let mut buffer = buffer;
            buffer.drain(..consumed);
            self.scanned = buffer.len();
            self.buffer = buffer;
        }
    }

    fn process_line<F>(&mut self, line: &str, sink: &mut F)
    where
        F: FnMut(DecodeResult),
    {
        let line = line.strip_suffix('\r').unwrap_or(line);

        match parse_sse_line_with(line, &self.config.field) {
            SseLine::Data(payload) => {
                if payload == self.config.sentinel {
                    self.close(CloseReason::Sentinel);
                    return;
                }

                match parse_payload(&payload) {
                    Ok(event) => {
                        self.stats.events += 1;
                        sink(Ok(event));
                    }
                    Err(err) => {
                        self.stats.malformed += 1;
                        tracing::warn!(payload = %err.payload, reason = %err.reason, "malformed event payload");
                        sink(Err(err));
                    }
                }
            }
            other => {
                self.stats.ignored += 1;
                tracing::trace!(line = ?other, "ignoring non-payload line");
            }
        }
    }

    /// Apply a cancellation requested through a [`CancelHandle`].
    fn observe_cancel(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.close(CloseReason::Cancelled);
            true
        } else {
            false
        }
    }

    fn close(&mut self, reason: CloseReason) {
        if !self.state.is_open() {
            return;
        }

        self.state = DecoderState::Closed(reason);
        self.buffer = String::new();
        self.scanned = 0;
        self.utf8.clear();

        tracing::debug!(
            reason = reason.as_str(),
            events = self.stats.events,
            malformed = self.stats.malformed,
            "stream decoder closed"
        );
    }
}
