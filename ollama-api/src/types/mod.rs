//! Data structures for requests and responses to the Ollama API.
//!
//! Every request type has a typed constructor plus chained setters for the
//! fields its operation accepts; there is no dynamically-typed option layer.

pub mod chat;
pub mod embed;
pub mod generate;
mod http;
mod models;
mod options;
mod shared;

pub use http::*;
pub use models::*;
pub use options::*;
pub use shared::*;
