//! The stream decoder: splits a chunked HTTP body into raw JSON frames.
//!
//! Streaming endpoints write back-to-back top-level JSON values with no outer
//! array and no guaranteed separators, so frame boundaries must be found with
//! JSON's own nesting and quoting rules; splitting on newlines would break
//! whenever the server packs two values into one chunk or splits one value
//! across two. [`FrameScanner`] does the boundary detection incrementally and
//! [`FrameStream`] drives it from a live byte stream, yielding each complete
//! value as soon as its last byte arrives.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::Stream;

use crate::{Error, Result};

/// Incremental boundary detector for back-to-back top-level JSON values.
///
/// Feed bytes in with [`push`](FrameScanner::push) in whatever chunks they
/// arrive, and take complete values out with
/// [`next_frame`](FrameScanner::next_frame). Chunk boundaries never affect
/// the extracted frames.
#[derive(Default)]
pub struct FrameScanner {
    buf: BytesMut,
    /// Scan position; bytes before it have been classified.
    pos: usize,
    /// Bracket nesting depth of the value being scanned; 0 between values.
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl FrameScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Extracts the next complete top-level value, if one is buffered.
    ///
    /// Returns `Ok(None)` when more bytes are needed. A byte that cannot
    /// begin a JSON object or array at the top level is an
    /// [`Error::Protocol`]; everything inside a value is left for the typed
    /// decode to validate.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>> {
        if self.depth == 0 {
            while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            let _ = self.buf.split_to(self.pos);
            self.pos = 0;

            match self.buf.first() {
                None => return Ok(None),
                Some(b'{') | Some(b'[') => {
                    self.depth = 1;
                    self.in_string = false;
                    self.escaped = false;
                    self.pos = 1;
                }
                Some(&byte) => {
                    return Err(Error::Protocol(format!(
                        "unexpected byte {:#04x} at start of stream value",
                        byte
                    )))
                }
            }
        }

        while self.pos < self.buf.len() {
            let byte = self.buf[self.pos];
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
            } else {
                match byte {
                    b'"' => self.in_string = true,
                    b'{' | b'[' => self.depth += 1,
                    b'}' | b']' => {
                        self.depth -= 1;
                        if self.depth == 0 {
                            let frame = self.buf.split_to(self.pos + 1).freeze();
                            self.pos = 0;
                            return Ok(Some(frame));
                        }
                    }
                    _ => {}
                }
            }
            self.pos += 1;
        }

        Ok(None)
    }

    /// Whether the scanner is mid-value, i.e. the input ended on a truncated
    /// frame.
    pub fn has_partial(&self) -> bool {
        self.depth > 0
    }
}

/// Turns a stream of body chunks into a stream of raw JSON frames.
///
/// End-of-body with a truncated final value is treated as a clean stop, the
/// same as a body that ends exactly on a frame boundary. Any other failure
/// (transport error, framing violation) is yielded exactly once, after which
/// the stream is fused.
pub struct FrameStream<S> {
    inner: S,
    scanner: FrameScanner,
    finished: bool,
}

impl<S> FrameStream<S>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            scanner: FrameScanner::new(),
            finished: false,
        }
    }
}

impl<S> Stream for FrameStream<S>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
{
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        loop {
            match this.scanner.next_frame() {
                Ok(Some(frame)) => return Poll::Ready(Some(Ok(frame))),
                Ok(None) => {}
                Err(e) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.scanner.push(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    if this.scanner.has_partial() {
                        // Truncation exactly at end of body is a clean stop,
                        // not an error.
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            "response body ended inside a JSON value; discarding partial frame"
                        );
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
