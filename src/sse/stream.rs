//! Async adapter from a transport byte stream to decoded events.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::{GuruError, StreamError};
use crate::sse::{DecodeResult, DecodedEvent};
use crate::traits::{ByteStream, EventDecoder, HttpError};

/// Stream of decoded guidance events.
///
/// `Err` items are either a non-fatal malformed frame (see
/// [`GuruError::is_fatal`]) or the single fatal error that ends the stream.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<DecodedEvent, GuruError>> + Send>>;

struct PullState<D> {
    body: ByteStream,
    decoder: D,
    ready: VecDeque<Result<DecodedEvent, GuruError>>,
    done: bool,
}

impl<D> PullState<D> {
    fn enqueue(&mut self, items: Vec<DecodeResult>) {
        self.ready
            .extend(items.into_iter().map(|item| item.map_err(GuruError::from)));
    }
}

/// Pull `body` through `decoder` until the decoder closes or the body ends.
///
/// - Stops reading the body as soon as the termination sentinel is decoded.
/// - On natural end of the body the decoder is finished, flushing a final
///   unterminated frame.
/// - A transport error cancels the decoder and yields exactly one fatal
///   error. A transport-side cancel ends the stream without one.
/// - Cancelling the decoder through its [`CancelHandle`](crate::sse::CancelHandle)
///   ends the stream without an error, even while the body is idle.
pub fn decode_stream<D>(body: ByteStream, decoder: D) -> EventStream
where
    D: EventDecoder + 'static,
{
    let cancel = decoder.cancel_handle();
    let state = PullState {
        body,
        decoder,
        ready: VecDeque::new(),
        done: false,
    };

    let events = stream::unfold(state, move |mut state| {
        let cancel = cancel.clone();
        async move {
            loop {
                // Drain anything already decoded before touching the transport
                if let Some(item) = state.ready.pop_front() {
                    return Some((item, state));
                }
                if state.done || state.decoder.is_closed() {
                    return None;
                }

                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    next = state.body.next() => Some(next),
                };
                let Some(next) = next else {
                    debug!("Event stream cancelled while waiting for data");
                    state.decoder.cancel();
                    return None;
                };

                match next {
                    Some(Ok(chunk)) => {
                        let items = state.decoder.feed(&chunk);
                        state.enqueue(items);
                    }
                    Some(Err(HttpError::Cancelled)) => {
                        debug!("Transport cancelled mid-stream");
                        state.decoder.cancel();
                        state.done = true;
                    }
                    Some(Err(err)) => {
                        warn!("Transport failed mid-stream: {}", err);
                        state.decoder.cancel();
                        state.done = true;
                        state.ready.push_back(Err(transport_failure(err).into()));
                    }
                    None => {
                        let items = state.decoder.finish();
                        state.enqueue(items);
                        state.done = true;
                    }
                }
            }
        }
    });

    Box::pin(events)
}

fn transport_failure(err: HttpError) -> StreamError {
    match err {
        HttpError::Timeout(message) => StreamError::Timeout { message },
        other => StreamError::ConnectionLost {
            message: other.to_string(),
        },
    }
}
