//! A typed client for the Ollama HTTP API.
//!
//! The entry point is [`Client`], constructed through [`Client::builder`].
//! Every API operation has a non-streaming method returning a single decoded
//! response, and the long-running operations (generate, chat, pull, push,
//! create) additionally have a `_stream` variant returning a typed
//! [`futures::Stream`] of events decoded from the chunked response body.
//!
//! ```no_run
//! use ollama_api::types::generate::GenerateRequest;
//! use ollama_api::Client;
//!
//! # async fn run() -> ollama_api::Result<()> {
//! let client = Client::builder().build()?;
//! let response = client
//!     .generate(GenerateRequest::new("llama3.2", "Why is the sky blue?"))
//!     .await?;
//! println!("{}", response.response);
//! # Ok(())
//! # }
//! ```
//!
//! Dropping a stream cancels the in-flight request and releases the response
//! body; racing `next()` against a timer or shutdown signal gives the same
//! guarantee without losing frames that already parsed.

use std::sync::Arc;

use thiserror::Error;

use self::transport::Transport;

pub mod api;
pub mod blob;
pub mod builder;
pub mod client;
pub mod decode;
pub mod stream;
pub mod think;
pub mod transport;
pub mod types;

/// Handle to one Ollama server. Cheap to clone; configuration is read-only
/// after construction and shared by all concurrent operations.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport + Send + Sync>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration or request construction failure.
    #[error("client error: {0}")]
    Client(String),

    /// Network-level failure: connection refused, DNS, deadline expiry.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("request failed with status {status}: {message}")]
    Response { status: u16, message: String },

    /// A response body or stream frame was not valid JSON for its schema.
    #[error("failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The server reported an error inside an otherwise healthy stream.
    #[error("server error: {0}")]
    Server(String),

    /// The stream body violated the back-to-back JSON value framing.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl Error {
    /// HTTP status code, when this error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was caused by the request deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }
}
