//! Runtime hooks for tool execution lifecycle events.
//!
//! ```rust
//! use stooling::{NoopToolRuntimeHooks, ToolRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = NoopToolRuntimeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use crate::{ToolError, ToolExecutionContext, ToolInvocation, ToolValue};

pub trait ToolRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _invocation: &ToolInvocation, _context: &ToolExecutionContext) {}

    fn on_execution_success(
        &self,
        _invocation: &ToolInvocation,
        _context: &ToolExecutionContext,
        _value: &ToolValue,
        _elapsed: Duration,
    ) {
    }

    fn on_execution_failure(
        &self,
        _invocation: &ToolInvocation,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolRuntimeHooks;

impl ToolRuntimeHooks for NoopToolRuntimeHooks {}
