use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use crate::transport::{classify_response_error, ByteStream, Transport};
use crate::types::{HttpBody, HttpRequest, HttpResponse, HttpVerb};
use crate::Result;

/// A [`Transport`] test double.
///
/// Canned responses are consumed in FIFO order, every request is recorded for
/// later assertion, and non-success statuses run through the same
/// [`classify_response_error`] path as the real transport, so error-handling
/// tests exercise the production classification code.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// `(status, body)` pairs served to `execute` calls, and to
    /// `execute_stream` calls when the status is an error.
    responses: Arc<Mutex<VecDeque<(u16, Bytes)>>>,
    /// Chunk sequences served to `execute_stream` calls.
    stream_bodies: Arc<Mutex<VecDeque<Vec<Bytes>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub verb: HttpVerb,
    pub path: String,
    pub json: Option<serde_json::Value>,
    pub raw: Option<Bytes>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a `(status, body)` pair for the next full-body request. A
    /// status of 400 or above is classified into an error, exactly as the
    /// real transport would.
    pub fn with_response(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.into()));
        self
    }

    /// Queues a successful JSON response for the next full-body request.
    pub fn with_json_response<T: serde::Serialize>(self, body: &T) -> Self {
        let bytes = serde_json::to_vec(body).expect("mock response must serialize");
        self.with_response(200, bytes)
    }

    /// Queues the body chunks for the next streaming request, delivered as
    /// separate reads in order.
    pub fn with_stream_chunks<I, B>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        self.stream_bodies
            .lock()
            .unwrap()
            .push_back(chunks.into_iter().map(Into::into).collect());
        self
    }

    /// Everything the mock has been asked so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &HttpRequest) {
        let (json, raw) = match &request.body {
            HttpBody::Empty => (None, None),
            HttpBody::Json(value) => (Some(value.clone()), None),
            HttpBody::Raw(bytes) => (None, Some(bytes.clone())),
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            verb: request.verb,
            path: request.path.clone(),
            json,
            raw,
        });
    }

    fn pop_response(&self) -> Option<(u16, Bytes)> {
        self.responses.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.record(&request);
        let (status, body) = self.pop_response().unwrap_or((200, Bytes::new()));
        if status >= 400 {
            return Err(classify_response_error(status, &body));
        }
        Ok(HttpResponse { status, body })
    }

    async fn execute_stream(&self, request: HttpRequest) -> Result<ByteStream> {
        self.record(&request);
        let failure = {
            let mut responses = self.responses.lock().unwrap();
            if responses.front().is_some_and(|(status, _)| *status >= 400) {
                responses.pop_front()
            } else {
                None
            }
        };
        if let Some((status, body)) = failure {
            return Err(classify_response_error(status, &body));
        }
        let chunks = self
            .stream_bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(stream::iter(chunks).map(Ok).boxed())
    }
}
