//! One-call convenience wrappers over [`Client`].
//!
//! These cover the everyday calls with plain arguments; anything more
//! (options, formats, tools, keep-alive) goes through the request builders
//! and the corresponding [`Client`] method. Each function takes the client
//! explicitly; there is no process-wide default instance.
//!
//! ```no_run
//! # async fn run() -> ollama_api::Result<()> {
//! let client = ollama_api::Client::builder().build()?;
//! let answer = ollama_api::api::generate(&client, "llama3.2", "Why is the sky blue?").await?;
//! println!("{}", answer.response);
//! # Ok(())
//! # }
//! ```

use crate::types::chat::{ChatRequest, ChatResponse, ChatStream};
use crate::types::embed::{EmbedInput, EmbedRequest, EmbedResponse};
use crate::types::generate::{GenerateRequest, GenerateResponse, GenerateStream};
use crate::types::{
    ListResponse, Message, ProgressStream, PullRequest, ShowRequest, ShowResponse, StatusResponse,
    VersionResponse,
};
use crate::{Client, Result};

/// Generates a completion for a prompt.
pub async fn generate(client: &Client, model: &str, prompt: &str) -> Result<GenerateResponse> {
    client.generate(GenerateRequest::new(model, prompt)).await
}

/// Generates a completion for a prompt, streamed chunk by chunk.
pub async fn generate_stream(client: &Client, model: &str, prompt: &str) -> Result<GenerateStream> {
    client
        .generate_stream(GenerateRequest::new(model, prompt))
        .await
}

/// Sends a chat conversation and returns the reply.
pub async fn chat(client: &Client, model: &str, messages: Vec<Message>) -> Result<ChatResponse> {
    client.chat(ChatRequest::new(model, messages)).await
}

/// Sends a chat conversation and streams the reply.
pub async fn chat_stream(
    client: &Client,
    model: &str,
    messages: Vec<Message>,
) -> Result<ChatStream> {
    client.chat_stream(ChatRequest::new(model, messages)).await
}

/// Computes embeddings for one or more inputs.
pub async fn embed(
    client: &Client,
    model: &str,
    input: impl Into<EmbedInput>,
) -> Result<EmbedResponse> {
    client.embed(EmbedRequest::new(model, input)).await
}

/// Lists the models available locally.
pub async fn list(client: &Client) -> Result<ListResponse> {
    client.list().await
}

/// Shows details for one model.
pub async fn show(client: &Client, model: &str) -> Result<ShowResponse> {
    client.show(ShowRequest::new(model)).await
}

/// Downloads a model, waiting for completion.
pub async fn pull(client: &Client, model: &str) -> Result<StatusResponse> {
    client.pull(PullRequest::new(model)).await
}

/// Downloads a model, streaming progress events.
pub async fn pull_stream(client: &Client, model: &str) -> Result<ProgressStream> {
    client.pull_stream(PullRequest::new(model)).await
}

/// Reports the server version.
pub async fn version(client: &Client) -> Result<VersionResponse> {
    client.version().await
}
