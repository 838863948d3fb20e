//! Tracing-based observability hooks for tool execution and routing phases.
//!
//! ```rust
//! use sobserve::TracingObservabilityHooks;
//! use srouter::RouterHooks;
//!
//! fn accepts_router_hooks(_hooks: &dyn RouterHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_router_hooks(&hooks);
//! ```

use std::time::Duration;

use sprovider::{ProviderError, ToolCall};
use srouter::{ConversationTurn, RouterHooks, RouterPhase};
use stooling::{ToolError, ToolExecutionContext, ToolInvocation, ToolRuntimeHooks, ToolValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, invocation: &ToolInvocation, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = invocation.name,
            tool_call_id = invocation.call_id,
            session_id = %context.session_id
        );
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
        value: &ToolValue,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = invocation.name,
            tool_call_id = invocation.call_id,
            session_id = %context.session_id,
            value = %value,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = invocation.name,
            tool_call_id = invocation.call_id,
            session_id = %context.session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl RouterHooks for TracingObservabilityHooks {
    fn on_selection(&self, selected: Option<&ToolCall>, ignored_calls: usize) {
        match selected {
            Some(call) => tracing::info!(
                phase = "router",
                event = "tool_selected",
                tool_name = call.name,
                tool_call_id = call.id,
                ignored_calls
            ),
            None => tracing::info!(phase = "router", event = "direct_answer"),
        }

        if ignored_calls > 0 {
            tracing::warn!(
                phase = "router",
                event = "extra_tool_calls_ignored",
                ignored_calls
            );
        }
    }

    fn on_turn_complete(&self, turn: &ConversationTurn, elapsed: Duration) {
        tracing::info!(
            phase = "router",
            event = "turn_complete",
            tool_name = turn.selected_tool.as_deref(),
            tool_success = turn.tool_result.as_ref().map(|result| result.is_success()),
            reply_chars = turn.reply.chars().count() as u64,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_completion_failure(&self, phase: RouterPhase, error: &ProviderError) {
        tracing::error!(
            phase = "router",
            event = "completion_failure",
            router_phase = ?phase,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}
