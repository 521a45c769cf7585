//! Request and response types for the `/api/chat` endpoint.

use std::pin::Pin;

use futures::Stream;
use ollama_api_macros::FromJson;
use serde::{Deserialize, Serialize};

use crate::stream::StreamEvent;
use crate::think;
use crate::types::options::Options;
use crate::types::shared::{KeepAlive, Message, Tool};
use crate::Result;

/// A chat completion request.
///
/// As with generation, the `stream` field is forced by the client to match
/// the invocation style.
#[derive(Serialize, Default, Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub think: Option<bool>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Default::default()
        }
    }

    /// Appends one message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Prepends a system message to the conversation.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.messages.insert(0, Message::system(system));
        self
    }

    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
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

    pub fn keep_alive(mut self, keep_alive: impl Into<KeepAlive>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    pub fn think(mut self, think: bool) -> Self {
        self.think = Some(think);
        self
    }
}

/// One chat response: the complete reply, or a single chunk of it when
/// streaming. The final chunk has `done == true`.
#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub message: Message,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
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

impl ChatResponse {
    /// Moves an inline `<think>` block from the message content into its
    /// thinking field, unless the server already populated the latter.
    pub fn split_thinking(&mut self) {
        think::split_inline_thinking(&mut self.message.content, &mut self.message.thinking);
    }
}

impl StreamEvent for ChatResponse {
    fn is_terminal(&self) -> bool {
        self.done
    }

    fn normalize(&mut self) {
        self.split_thinking();
    }
}

/// A stream of [`ChatResponse`] chunks, ending after the `done` event.
pub struct ChatStream {
    pub(crate) inner: Pin<Box<dyn Stream<Item = Result<ChatResponse>> + Send>>,
}

impl Stream for ChatStream {
    type Item = Result<ChatResponse>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
