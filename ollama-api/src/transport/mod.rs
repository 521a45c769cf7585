use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::types::{ErrorResponse, HttpRequest, HttpResponse};
use crate::{Error, Result};

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::{MockTransport, RecordedRequest};
pub use reqwest_transport::ReqwestTransport;

/// A live response body, delivered in whatever chunks the network produces.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends a request and reads the full response body.
    ///
    /// A status of 400 or above is classified into [`Error::Response`] by
    /// [`classify_response_error`]; callers only ever see successful
    /// [`HttpResponse`] values.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Sends a request and hands back the response body as a byte stream,
    /// without waiting for it to close. The returned stream owns the body;
    /// dropping it releases the connection.
    async fn execute_stream(&self, request: HttpRequest) -> Result<ByteStream>;
}

/// Builds the error for a non-success status from the response body.
///
/// The server's convention is an `{"error": "..."}` JSON body; when that is
/// present with a non-empty message it becomes the error message, otherwise
/// the body text is used verbatim.
pub fn classify_response_error(status: u16, body: &[u8]) -> Error {
    let mut message = String::from_utf8_lossy(body).into_owned();
    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        if !parsed.error.is_empty() {
            message = parsed.error;
        }
    }
    Error::Response { status, message }
}
