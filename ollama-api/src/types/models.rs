//! Model management types: listing, showing, pulling, pushing, creating,
//! deleting, and copying models, plus progress events for the streaming
//! variants.

use std::collections::HashMap;
use std::pin::Pin;

use futures::Stream;
use ollama_api_macros::FromJson;
use serde::{Deserialize, Serialize};

use crate::stream::StreamEvent;
use crate::types::options::Options;
use crate::types::shared::Message;
use crate::Result;

/// Response from `/api/tags`.
#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone)]
pub struct ListResponse {
    pub models: Vec<ModelSummary>,
}

#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct ModelSummary {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modified_at: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub details: Option<ModelDetails>,
}

#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct ModelDetails {
    #[serde(default)]
    pub parent_model: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub families: Vec<String>,
    #[serde(default)]
    pub parameter_size: String,
    #[serde(default)]
    pub quantization_level: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ShowRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl ShowRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            verbose: None,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }
}

#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone)]
pub struct ShowResponse {
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub modelfile: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub details: Option<ModelDetails>,
    #[serde(default)]
    pub model_info: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub parameters: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Serialize, Default, Debug, Clone)]
pub struct PullRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    pub stream: Option<bool>,
}

impl PullRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Allow pulling from a registry without TLS verification.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }
}

#[derive(Serialize, Default, Debug, Clone)]
pub struct PushRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    pub stream: Option<bool>,
}

impl PushRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }
}

/// A model creation request. Layer sources (`files`, `adapters`) map file
/// names to blob digests previously uploaded via
/// [`Client::create_blob`](crate::Client::create_blob).
#[derive(Serialize, Default, Debug, Clone)]
pub struct CreateRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modelfile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapters: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    pub stream: Option<bool>,
}

impl CreateRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn modelfile(mut self, modelfile: impl Into<String>) -> Self {
        self.modelfile = Some(modelfile.into());
        self
    }

    /// Base the new model on an existing one.
    pub fn from_model(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn files(mut self, files: HashMap<String, String>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn adapters(mut self, adapters: HashMap<String, String>) -> Self {
        self.adapters = Some(adapters);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn license(mut self, license: serde_json::Value) -> Self {
        self.license = Some(license);
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn parameters(mut self, parameters: Options) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn quantize(mut self, quantize: impl Into<String>) -> Self {
        self.quantize = Some(quantize.into());
        self
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct DeleteRequest {
    pub model: String,
}

impl DeleteRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CopyRequest {
    pub source: String,
    pub destination: String,
}

impl CopyRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Response from `/api/ps`.
#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone)]
pub struct ProcessResponse {
    pub models: Vec<ProcessModel>,
}

#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct ProcessModel {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub size_vram: u64,
    #[serde(default)]
    pub details: Option<ModelDetails>,
    #[serde(default)]
    pub context_length: u64,
}

/// One progress event from a streaming pull, push, or create. These streams
/// have no `done` gate; they emit progress until the body ends.
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
pub struct ProgressResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: u64,
}

impl StreamEvent for ProgressResponse {}

/// A stream of [`ProgressResponse`] events, ending when the body does.
pub struct ProgressStream {
    pub(crate) inner: Pin<Box<dyn Stream<Item = Result<ProgressResponse>> + Send>>,
}

impl Stream for ProgressStream {
    type Item = Result<ProgressResponse>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone, PartialEq)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize, Serialize, Default, FromJson, Debug, Clone, PartialEq)]
pub struct VersionResponse {
    pub version: String,
}
