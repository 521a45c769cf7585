//! The operation dispatcher: one method per API endpoint.
//!
//! Every operation forces the request's `stream` flag to match the
//! invocation style, so a stray value left by the caller never changes the
//! wire protocol. Non-streaming methods decode exactly one JSON body;
//! streaming methods attach the frame decoder to the live response body and
//! return a typed stream.

use std::path::Path;

use bytes::Bytes;

#[cfg(feature = "metrics")]
use metrics::counter;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::blob::blob_digest;
use crate::builder::ClientBuilder;
use crate::stream::EventStream;
use crate::types::chat::{ChatRequest, ChatResponse, ChatStream};
use crate::types::embed::{EmbedRequest, EmbedResponse, EmbeddingsRequest, EmbeddingsResponse};
use crate::types::generate::{GenerateRequest, GenerateResponse, GenerateStream};
use crate::types::{
    CopyRequest, CreateRequest, DeleteRequest, HttpRequest, ListResponse, ProcessResponse,
    ProgressStream, PullRequest, PushRequest, ShowRequest, ShowResponse, StatusResponse,
    VersionResponse,
};
use crate::{Client, Error, Result};

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Generates a completion and waits for the full response.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn generate(&self, mut request: GenerateRequest) -> Result<GenerateResponse> {
        #[cfg(feature = "metrics")]
        counter!("ollama_client.generate_requests_total", "type" => "non_streaming").increment(1);

        request.stream = Some(false);
        let request = HttpRequest::new("/api/generate").post().json(&request)?;
        let response = self.transport.execute(request).await?;

        let mut result = GenerateResponse::from_bytes(response.body)?;
        result.split_thinking();
        Ok(result)
    }

    /// Generates a completion as a stream of chunks; the final chunk has
    /// `done == true` and the stream ends immediately after it.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn generate_stream(&self, mut request: GenerateRequest) -> Result<GenerateStream> {
        #[cfg(feature = "metrics")]
        counter!("ollama_client.generate_requests_total", "type" => "streaming").increment(1);

        request.stream = Some(true);
        let request = HttpRequest::new("/api/generate").post().json(&request)?;
        let body = self.transport.execute_stream(request).await?;

        Ok(GenerateStream {
            inner: Box::pin(EventStream::new(body, "generate")),
        })
    }

    /// Sends a chat conversation and waits for the full reply.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn chat(&self, mut request: ChatRequest) -> Result<ChatResponse> {
        #[cfg(feature = "metrics")]
        counter!("ollama_client.chat_requests_total", "type" => "non_streaming").increment(1);

        request.stream = Some(false);
        let request = HttpRequest::new("/api/chat").post().json(&request)?;
        let response = self.transport.execute(request).await?;

        let mut result = ChatResponse::from_bytes(response.body)?;
        result.split_thinking();
        Ok(result)
    }

    /// Sends a chat conversation and streams the reply chunk by chunk.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn chat_stream(&self, mut request: ChatRequest) -> Result<ChatStream> {
        #[cfg(feature = "metrics")]
        counter!("ollama_client.chat_requests_total", "type" => "streaming").increment(1);

        request.stream = Some(true);
        let request = HttpRequest::new("/api/chat").post().json(&request)?;
        let body = self.transport.execute_stream(request).await?;

        Ok(ChatStream {
            inner: Box::pin(EventStream::new(body, "chat")),
        })
    }

    /// Computes embeddings for one or more inputs.
    pub async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse> {
        let request = HttpRequest::new("/api/embed").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        EmbedResponse::from_bytes(response.body)
    }

    /// Computes an embedding via the legacy single-prompt endpoint.
    pub async fn embeddings(&self, request: EmbeddingsRequest) -> Result<EmbeddingsResponse> {
        let request = HttpRequest::new("/api/embeddings").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        EmbeddingsResponse::from_bytes(response.body)
    }

    /// Lists the models available locally.
    pub async fn list(&self) -> Result<ListResponse> {
        let request = HttpRequest::new("/api/tags");
        let response = self.transport.execute(request).await?;
        ListResponse::from_bytes(response.body)
    }

    /// Shows details for one model.
    pub async fn show(&self, request: ShowRequest) -> Result<ShowResponse> {
        let request = HttpRequest::new("/api/show").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        ShowResponse::from_bytes(response.body)
    }

    /// Downloads a model, waiting for completion.
    pub async fn pull(&self, mut request: PullRequest) -> Result<StatusResponse> {
        request.stream = Some(false);
        let request = HttpRequest::new("/api/pull").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        StatusResponse::from_bytes(response.body)
    }

    /// Downloads a model, streaming progress events until the server closes
    /// the body.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn pull_stream(&self, mut request: PullRequest) -> Result<ProgressStream> {
        request.stream = Some(true);
        let request = HttpRequest::new("/api/pull").post().json(&request)?;
        let body = self.transport.execute_stream(request).await?;

        Ok(ProgressStream {
            inner: Box::pin(EventStream::new(body, "pull")),
        })
    }

    /// Uploads a model to a registry, waiting for completion.
    pub async fn push(&self, mut request: PushRequest) -> Result<StatusResponse> {
        request.stream = Some(false);
        let request = HttpRequest::new("/api/push").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        StatusResponse::from_bytes(response.body)
    }

    /// Uploads a model to a registry, streaming progress events.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn push_stream(&self, mut request: PushRequest) -> Result<ProgressStream> {
        request.stream = Some(true);
        let request = HttpRequest::new("/api/push").post().json(&request)?;
        let body = self.transport.execute_stream(request).await?;

        Ok(ProgressStream {
            inner: Box::pin(EventStream::new(body, "push")),
        })
    }

    /// Creates a model, waiting for completion.
    pub async fn create(&self, mut request: CreateRequest) -> Result<StatusResponse> {
        request.stream = Some(false);
        let request = HttpRequest::new("/api/create").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        StatusResponse::from_bytes(response.body)
    }

    /// Creates a model, streaming progress events.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn create_stream(&self, mut request: CreateRequest) -> Result<ProgressStream> {
        request.stream = Some(true);
        let request = HttpRequest::new("/api/create").post().json(&request)?;
        let body = self.transport.execute_stream(request).await?;

        Ok(ProgressStream {
            inner: Box::pin(EventStream::new(body, "create")),
        })
    }

    /// Deletes a model.
    pub async fn delete(&self, request: DeleteRequest) -> Result<StatusResponse> {
        let request = HttpRequest::new("/api/delete").delete().json(&request)?;
        let response = self.transport.execute(request).await?;
        Ok(status_from_http(response.status))
    }

    /// Copies a model under a new name.
    pub async fn copy(&self, request: CopyRequest) -> Result<StatusResponse> {
        let request = HttpRequest::new("/api/copy").post().json(&request)?;
        let response = self.transport.execute(request).await?;
        Ok(status_from_http(response.status))
    }

    /// Lists the models currently loaded in memory.
    pub async fn ps(&self) -> Result<ProcessResponse> {
        let request = HttpRequest::new("/api/ps");
        let response = self.transport.execute(request).await?;
        ProcessResponse::from_bytes(response.body)
    }

    /// Reports the server version.
    pub async fn version(&self) -> Result<VersionResponse> {
        let request = HttpRequest::new("/api/version");
        let response = self.transport.execute(request).await?;
        VersionResponse::from_bytes(response.body)
    }

    /// Uploads a file as a blob and returns its `sha256:<hex>` digest.
    ///
    /// The file is read once; the digest covers its full content and also
    /// names the upload path.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub async fn create_blob(&self, path: impl AsRef<Path> + std::fmt::Debug) -> Result<String> {
        let data = tokio::fs::read(path.as_ref()).await.map_err(|e| {
            Error::Client(format!(
                "failed to read blob file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let digest = blob_digest(&data);

        let request = HttpRequest::new(format!("/api/blobs/{digest}"))
            .post()
            .raw(Bytes::from(data));
        self.transport.execute(request).await?;
        Ok(digest)
    }

    /// Checks whether a blob with the given digest exists on the server.
    ///
    /// `Ok(true)` only for a 200 response, `Ok(false)` specifically for 404;
    /// any other failure is returned as an error.
    pub async fn check_blob(&self, digest: &str) -> Result<bool> {
        let request = HttpRequest::new(format!("/api/blobs/{digest}")).head();
        match self.transport.execute(request).await {
            Ok(response) => Ok(response.status == 200),
            Err(Error::Response { status: 404, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn status_from_http(status: u16) -> StatusResponse {
    let status = if status == 200 { "success" } else { "error" };
    StatusResponse {
        status: status.to_string(),
    }
}
