//! Completion provider contract.

use std::future::Future;
use std::pin::Pin;

use crate::{ModelRequest, ModelResponse, ProviderError, ProviderId};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A text-completion service that may answer directly or request a tool call.
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Base endpoint the provider talks to, used in user-facing diagnostics.
    fn endpoint(&self) -> String;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;
}
