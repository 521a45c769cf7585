//! Request and response types for the `/api/generate` endpoint.

use std::pin::Pin;

use futures::Stream;
use ollama_api_macros::FromJson;
use serde::{Deserialize, Serialize};

use crate::stream::StreamEvent;
use crate::think;
use crate::types::options::Options;
use crate::types::shared::{Image, KeepAlive};
use crate::Result;

/// A text-generation request.
///
/// The `stream` field is forced by the client to match the invocation style
/// ([`Client::generate`](crate::Client::generate) vs
/// [`Client::generate_stream`](crate::Client::generate_stream)); whatever a
/// caller sets here is overridden.
#[derive(Serialize, Default, Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Appended after the generated text; used for fill-in-the-middle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Conversation state returned by a previous response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,
    /// `"json"` or a JSON schema constraining the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub think: Option<bool>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn context(mut self, context: Vec<i64>) -> Self {
        self.context = Some(context);
        self
    }

    /// Send the prompt to the model verbatim, bypassing the template.
    pub fn raw(mut self) -> Self {
        self.raw = Some(true);
        self
    }

    pub fn format(mut self, format: serde_json::Value) -> Self {
        self.format = Some(format);
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    pub fn images(mut self, images: Vec<Image>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn keep_alive(mut self, keep_alive: impl Into<KeepAlive>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    pub fn think(mut self, think: bool) -> Self {
        self.think = Some(think);
        self
    }
}

/// One generation response: the complete answer on the non-streaming path, or
/// a single chunk of it on the streaming path.
///
/// Within a stream, the final event (and only the final event) has
/// `done == true` and carries the timing counters.
#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub thinking: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub context: Vec<i64>,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub load_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: u64,
    #[serde(default)]
    pub prompt_eval_duration: u64,
    #[serde(default)]
    pub eval_count: u64,
    #[serde(default)]
    pub eval_duration: u64,
}

impl GenerateResponse {
    /// Moves an inline `<think>` block from `response` into `thinking`.
    /// Does nothing when the server already populated `thinking`.
    pub fn split_thinking(&mut self) {
        think::split_inline_thinking(&mut self.response, &mut self.thinking);
    }
}

impl StreamEvent for GenerateResponse {
    fn is_terminal(&self) -> bool {
        self.done
    }

    fn normalize(&mut self) {
        self.split_thinking();
    }
}

/// A stream of [`GenerateResponse`] chunks, ending after the `done` event.
pub struct GenerateStream {
    pub(crate) inner: Pin<Box<dyn Stream<Item = Result<GenerateResponse>> + Send>>,
}

impl std::fmt::Debug for GenerateStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateStream").finish_non_exhaustive()
    }
}

impl Stream for GenerateStream {
    type Item = Result<GenerateResponse>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
