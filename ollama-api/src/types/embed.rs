//! Embedding types: the batch `/api/embed` endpoint and its legacy
//! single-prompt predecessor `/api/embeddings`.

use ollama_api_macros::FromJson;
use serde::{Deserialize, Serialize};

use crate::types::options::Options;
use crate::types::shared::KeepAlive;

/// Input to the batch embedding endpoint: one string or many.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum EmbedInput {
    Single(String),
    Batch(Vec<String>),
}

impl From<&str> for EmbedInput {
    fn from(value: &str) -> Self {
        EmbedInput::Single(value.to_string())
    }
}

impl From<String> for EmbedInput {
    fn from(value: String) -> Self {
        EmbedInput::Single(value)
    }
}

impl From<Vec<String>> for EmbedInput {
    fn from(value: Vec<String>) -> Self {
        EmbedInput::Batch(value)
    }
}

impl From<Vec<&str>> for EmbedInput {
    fn from(value: Vec<&str>) -> Self {
        EmbedInput::Batch(value.into_iter().map(str::to_string).collect())
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct EmbedRequest {
    pub model: String,
    pub input: EmbedInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,
}

impl EmbedRequest {
    pub fn new(model: impl Into<String>, input: impl Into<EmbedInput>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            truncate: None,
            options: None,
            keep_alive: None,
        }
    }

    /// Truncate each input to fit the context window instead of erroring.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = Some(truncate);
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
}

/// One embedding vector per input, in input order.
#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone, PartialEq)]
pub struct EmbedResponse {
    #[serde(default)]
    pub model: String,
    pub embeddings: Vec<Vec<f64>>,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub load_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: u64,
}

/// Legacy single-prompt embedding request.
#[derive(Serialize, Debug, Clone)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,
}

impl EmbeddingsRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: None,
            keep_alive: None,
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }
}

#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone, PartialEq)]
pub struct EmbeddingsResponse {
    #[serde(default)]
    pub embedding: Vec<f64>,
}
