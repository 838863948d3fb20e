//! Metrics-based observability hooks for tool execution and routing phases.
//!
//! ```rust
//! use sobserve::MetricsObservabilityHooks;
//! use stooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use sprovider::{ProviderError, ToolCall};
use srouter::{ConversationTurn, RouterHooks, RouterPhase};
use stooling::{ToolError, ToolExecutionContext, ToolInvocation, ToolRuntimeHooks, ToolValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, invocation: &ToolInvocation, _context: &ToolExecutionContext) {
        metrics::counter!(
            "switchboard_tool_execution_start_total",
            "tool_name" => invocation.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        _context: &ToolExecutionContext,
        _value: &ToolValue,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "switchboard_tool_execution_success_total",
            "tool_name" => invocation.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "switchboard_tool_execution_duration_seconds",
            "tool_name" => invocation.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "switchboard_tool_execution_failure_total",
            "tool_name" => invocation.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "switchboard_tool_execution_duration_seconds",
            "tool_name" => invocation.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl RouterHooks for MetricsObservabilityHooks {
    fn on_selection(&self, selected: Option<&ToolCall>, ignored_calls: usize) {
        let tool_name = selected.map_or_else(|| "none".to_string(), |call| call.name.clone());
        metrics::counter!(
            "switchboard_router_selection_total",
            "tool_name" => tool_name
        )
        .increment(1);

        if ignored_calls > 0 {
            metrics::counter!("switchboard_router_ignored_tool_calls_total")
                .increment(ignored_calls as u64);
        }
    }

    fn on_turn_complete(&self, turn: &ConversationTurn, elapsed: Duration) {
        let route = if turn.used_tool() { "tool" } else { "direct" };
        metrics::counter!("switchboard_router_turn_total", "route" => route).increment(1);
        metrics::histogram!("switchboard_router_turn_duration_seconds", "route" => route)
            .record(elapsed.as_secs_f64());
    }

    fn on_completion_failure(&self, phase: RouterPhase, error: &ProviderError) {
        metrics::counter!(
            "switchboard_router_completion_failure_total",
            "router_phase" => format!("{phase:?}"),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
