//! Common `sprovider` imports for downstream crates.

pub use crate::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition, ToolOutput,
};
pub use scommon::BoxFuture;
