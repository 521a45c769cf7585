//! The typed event layer over the raw frame decoder.
//!
//! [`EventStream`] decodes each frame produced by
//! [`FrameStream`](crate::decode::FrameStream) into one operation's event
//! type and enforces the stream lifecycle: generate/chat streams end
//! immediately after the event whose `done` flag is set, progress streams
//! end with the body, and any frame that fails to decode is fatal to the
//! whole stream.
//!
//! Cancellation is structural: dropping an [`EventStream`] drops the
//! underlying response body. A consumer that must react to an external
//! signal races `next()` against it (`tokio::select!` or
//! `tokio::time::timeout`); every await inside the stream is a valid
//! cancellation point, and frames that finished parsing before the
//! cancellation have already been delivered.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use serde::de::DeserializeOwned;

use crate::decode::FrameStream;
use crate::types::ErrorResponse;
use crate::{Error, Result};

/// Behavior an operation's event type plugs into [`EventStream`].
pub trait StreamEvent: DeserializeOwned + Unpin + Send {
    /// Whether this event terminates the stream (the `done` flag of
    /// generate/chat). Progress events never do.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Post-decode fixup; used to split inline thinking blocks out of text
    /// fields.
    fn normalize(&mut self) {}
}

/// Decodes raw frames into typed events for one streaming operation.
pub struct EventStream<S, M>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
    M: StreamEvent,
{
    frames: FrameStream<S>,
    operation: &'static str,
    finished: bool,
    _marker: PhantomData<M>,
}

impl<S, M> EventStream<S, M>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
    M: StreamEvent,
{
    /// Wraps a response byte stream. `operation` names the endpoint in
    /// decode errors.
    pub fn new(body: S, operation: &'static str) -> Self {
        Self {
            frames: FrameStream::new(body),
            operation,
            finished: false,
            _marker: PhantomData,
        }
    }

    fn decode_frame(&self, frame: &[u8]) -> Result<M> {
        // The server reports mid-stream failures as an error object. Event
        // types tolerate missing fields, so the error shape must be checked
        // first or it would decode as an empty event.
        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(frame) {
            if !err.error.is_empty() {
                return Err(Error::Server(err.error));
            }
        }
        serde_json::from_slice::<M>(frame).map_err(|source| Error::Decode {
            context: self.operation,
            source,
        })
    }
}

impl<S, M> Stream for EventStream<S, M>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
    M: StreamEvent,
{
    type Item = Result<M>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        match Pin::new(&mut this.frames).poll_next(cx) {
            Poll::Ready(Some(Ok(frame))) => match this.decode_frame(&frame) {
                Ok(mut event) => {
                    event.normalize();
                    if event.is_terminal() {
                        this.finished = true;
                    }
                    Poll::Ready(Some(Ok(event)))
                }
                Err(e) => {
                    // One bad frame ends the stream; frames are not skipped.
                    this.finished = true;
                    Poll::Ready(Some(Err(e)))
                }
            },
            Poll::Ready(Some(Err(e))) => {
                this.finished = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
