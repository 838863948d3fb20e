//! Completion provider layer: request/response model and the Ollama adapter.

mod error;
mod model;
mod provider;

#[cfg(feature = "provider-ollama")]
pub mod adapters;

pub mod prelude;

pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    DEFAULT_MODEL, Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ProviderId, Role, StopReason, TokenUsage, ToolCall, ToolDefinition, ToolOutput,
};
pub use provider::{ModelProvider, ProviderFuture};
