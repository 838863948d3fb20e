use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use sprovider::{ProviderError, ToolCall};
use srouter::{ConversationTurn, RouterHooks, RouterPhase};
use stooling::{ToolError, ToolExecutionContext, ToolInvocation, ToolRuntimeHooks, ToolValue};

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, invocation: &ToolInvocation, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(invocation, context)
        }));
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
        value: &ToolValue,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(invocation, context, value, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(invocation, context, error, elapsed)
        }));
    }
}

pub struct SafeRouterHooks<H> {
    inner: H,
}

impl<H> SafeRouterHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> RouterHooks for SafeRouterHooks<H>
where
    H: RouterHooks,
{
    fn on_selection(&self, selected: Option<&ToolCall>, ignored_calls: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_selection(selected, ignored_calls)
        }));
    }

    fn on_turn_complete(&self, turn: &ConversationTurn, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_complete(turn, elapsed)
        }));
    }

    fn on_completion_failure(&self, phase: RouterPhase, error: &ProviderError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_completion_failure(phase, error)
        }));
    }
}
