use bytes::Bytes;
use serde::Serialize;

use crate::{Error, Result};

/// A transport-level request: path relative to the base URL, verb, and body.
#[derive(Default, Debug)]
pub struct HttpRequest {
    pub path: String,
    pub verb: HttpVerb,
    pub body: HttpBody,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    #[default]
    Get,
    Post,
    Delete,
    Head,
}

/// Request body. `Raw` is used for blob uploads and must not force a
/// `Content-Type` header.
#[derive(Default, Debug)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Raw(Bytes),
}

impl HttpRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn post(mut self) -> Self {
        self.verb = HttpVerb::Post;
        self
    }

    pub fn delete(mut self) -> Self {
        self.verb = HttpVerb::Delete;
        self
    }

    pub fn head(mut self) -> Self {
        self.verb = HttpVerb::Head;
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::Client(format!("failed to serialize request body: {e}")))?;
        self.body = HttpBody::Json(value);
        Ok(self)
    }

    pub fn raw(mut self, body: Bytes) -> Self {
        self.body = HttpBody::Raw(body);
        self
    }
}

/// A successful (status < 400) transport-level response.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}
