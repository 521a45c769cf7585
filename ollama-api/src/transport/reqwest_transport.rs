use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};

use crate::builder::USER_AGENT;
use crate::transport::{classify_response_error, ByteStream, Transport};
use crate::types::{HttpBody, HttpRequest, HttpResponse, HttpVerb};
use crate::{Error, Result};

/// The default [`Transport`], backed by `reqwest`.
///
/// JSON bodies get their `Content-Type` set per request; raw bodies (blob
/// uploads) are sent without one, and the configured default headers never
/// include it, so nothing forces the header on an upload.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(base_url: Url, timeout: Duration, headers: HeaderMap) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Sends the request and classifies non-success statuses, returning only
    /// live responses with a usable body.
    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|e| Error::Client(format!("invalid request path {:?}: {e}", request.path)))?;

        let mut builder = match request.verb {
            HttpVerb::Get => self.client.get(url),
            HttpVerb::Post => self.client.post(url),
            HttpVerb::Delete => self.client.delete(url),
            HttpVerb::Head => self.client.head(url),
        };

        match request.body {
            HttpBody::Empty => {}
            HttpBody::Json(value) => builder = builder.json(&value),
            HttpBody::Raw(bytes) => builder = builder.body(bytes),
        }

        let response = builder.send().await.map_err(Error::Transport)?;
        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.bytes().await.unwrap_or_default();
            return Err(classify_response_error(status, &body));
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(path = %request.path)))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Error::Transport)?;
        Ok(HttpResponse { status, body })
    }

    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(path = %request.path)))]
    async fn execute_stream(&self, request: HttpRequest) -> Result<ByteStream> {
        let response = self.send(request).await?;
        let stream = response
            .bytes_stream()
            .map(|item| item.map_err(Error::Transport))
            .boxed();
        Ok(stream)
    }
}
