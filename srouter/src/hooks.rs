//! Router lifecycle hooks.

use std::time::Duration;

use sprovider::{ProviderError, ToolCall};

use crate::{ConversationTurn, RouterPhase};

pub trait RouterHooks: Send + Sync {
    /// Called once the model has answered the selection request. `selected` is `None`
    /// when the model answered directly.
    fn on_selection(&self, _selected: Option<&ToolCall>, _ignored_calls: usize) {}

    fn on_turn_complete(&self, _turn: &ConversationTurn, _elapsed: Duration) {}

    fn on_completion_failure(&self, _phase: RouterPhase, _error: &ProviderError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRouterHooks;

impl RouterHooks for NoopRouterHooks {}
