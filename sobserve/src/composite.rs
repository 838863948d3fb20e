//! Fan-out of one hook call to two hook implementations, in order.

use std::time::Duration;

use sprovider::{ProviderError, ToolCall};
use srouter::{ConversationTurn, RouterHooks, RouterPhase};
use stooling::{ToolError, ToolExecutionContext, ToolInvocation, ToolRuntimeHooks, ToolValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeHooks<A, B> {
    first: A,
    second: B,
}

impl<A, B> CompositeHooks<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> ToolRuntimeHooks for CompositeHooks<A, B>
where
    A: ToolRuntimeHooks,
    B: ToolRuntimeHooks,
{
    fn on_execution_start(&self, invocation: &ToolInvocation, context: &ToolExecutionContext) {
        self.first.on_execution_start(invocation, context);
        self.second.on_execution_start(invocation, context);
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
        value: &ToolValue,
        elapsed: Duration,
    ) {
        self.first
            .on_execution_success(invocation, context, value, elapsed);
        self.second
            .on_execution_success(invocation, context, value, elapsed);
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        self.first
            .on_execution_failure(invocation, context, error, elapsed);
        self.second
            .on_execution_failure(invocation, context, error, elapsed);
    }
}

impl<A, B> RouterHooks for CompositeHooks<A, B>
where
    A: RouterHooks,
    B: RouterHooks,
{
    fn on_selection(&self, selected: Option<&ToolCall>, ignored_calls: usize) {
        self.first.on_selection(selected, ignored_calls);
        self.second.on_selection(selected, ignored_calls);
    }

    fn on_turn_complete(&self, turn: &ConversationTurn, elapsed: Duration) {
        self.first.on_turn_complete(turn, elapsed);
        self.second.on_turn_complete(turn, elapsed);
    }

    fn on_completion_failure(&self, phase: RouterPhase, error: &ProviderError) {
        self.first.on_completion_failure(phase, error);
        self.second.on_completion_failure(phase, error);
    }
}
