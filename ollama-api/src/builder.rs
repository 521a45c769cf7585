use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::transport::{ReqwestTransport, Transport};
use crate::{Client, Error, Result};

pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Large models can take minutes to load before the first byte arrives.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub(crate) const USER_AGENT: &str = concat!("ollama-api/", env!("CARGO_PKG_VERSION"));

/// A builder for constructing a [`Client`].
///
/// Configures the base address of the Ollama server, the request timeout,
/// extra headers layered on top of the defaults, and optionally a custom
/// transport layer.
///
/// - Host: explicit value, else the `OLLAMA_HOST` environment variable, else
///   `http://localhost:11434`.
/// - Timeout: 120 seconds unless overridden; covers the whole call, including
///   reading a streaming body to its end.
/// - Transport: `reqwest`-based [`ReqwestTransport`] by default. Supplying a
///   transport (e.g. [`MockTransport`](crate::transport::MockTransport))
///   makes the other network settings irrelevant.
pub struct ClientBuilder {
    host: Option<String>,
    timeout: Duration,
    headers: Vec<(String, String)>,
    transport: Option<Arc<dyn Transport + Send + Sync>>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            host: None,
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
            transport: None,
        }
    }

    /// Sets the base URL of the Ollama server.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the request timeout. Applies to each call in full, streaming
    /// bodies included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request, e.g. an `Authorization` value
    /// for a proxy in front of the server.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a custom transport implementation, replacing the default
    /// `reqwest`-based one. Useful for tests and for exotic HTTP setups.
    pub fn transport(mut self, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`Client`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the host URL does not parse, a header is
    /// malformed, or the underlying HTTP client cannot be constructed.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub fn build(self) -> Result<Client> {
        let transport = if let Some(t) = self.transport {
            t
        } else {
            let host = self.host.unwrap_or_else(|| {
                std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
            });
            let base_url = Url::parse(&host)
                .map_err(|e| Error::Client(format!("invalid host URL {host:?}: {e}")))?;

            let mut headers = HeaderMap::new();
            for (name, value) in &self.headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| Error::Client(format!("invalid header name {name:?}: {e}")))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|e| Error::Client(format!("invalid header value: {e}")))?;
                headers.insert(name, value);
            }

            Arc::new(ReqwestTransport::new(base_url, self.timeout, headers)?)
        };

        Ok(Client { transport })
    }
}
