use std::collections::HashMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    #[default]
    User,
    Assistant,
    Tool,
}

/// One message in a chat conversation, on both the request and response side.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_name: String,
    /// The model's deliberation channel. Populated by the server when thinking
    /// is enabled, or recovered from an inline `<think>` block otherwise.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thinking: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// A tool result message, answering a tool call by name.
    pub fn tool(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            ..Self::with_role(Role::Tool, content)
        }
    }

    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn images(mut self, images: Vec<Image>) -> Self {
        self.images = images;
        self
    }
}

/// A base64-encoded image payload sent alongside a prompt or message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Image(pub String);

impl Image {
    /// Wraps data that is already base64-encoded.
    pub fn from_base64(data: impl Into<String>) -> Self {
        Image(data.into())
    }

    /// Reads and encodes an image file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref()).map_err(|e| {
            Error::Client(format!(
                "failed to read image file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(Image(BASE64.encode(data)))
    }
}

/// A tool the model may call during a chat.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolFunction,
}

impl Tool {
    /// A `function`-type tool with a JSON-schema parameter description.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Tool {
            kind: "function".to_string(),
            function: ToolFunction {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolFunction {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

/// A call the model made to one of the supplied tools.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

/// How long the model stays loaded after the call, e.g. `"5m"` or a number
/// of seconds. The wire format accepts either shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum KeepAlive {
    Duration(String),
    Seconds(i64),
}

impl From<&str> for KeepAlive {
    fn from(value: &str) -> Self {
        KeepAlive::Duration(value.to_string())
    }
}

impl From<i64> for KeepAlive {
    fn from(value: i64) -> Self {
        KeepAlive::Seconds(value)
    }
}

/// The error body shape the server uses on failures, in full responses and
/// inside streams alike.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
