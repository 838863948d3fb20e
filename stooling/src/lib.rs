//! Capability layer for describing, registering, and executing tools.

mod args;
mod error;
mod hooks;
mod registry;
mod runtime;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolExecutor, ParamType, Tool, ToolArguments, ToolDescriptor, ToolError,
        ToolErrorKind, ToolExecutionContext, ToolExecutor, ToolFuture, ToolInvocation,
        ToolRegistry, ToolResult, ToolValue,
    };
}

pub use args::{ToolArguments, parse_json_object};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolExecutor, ToolExecutor};
pub use schema::{ParamType, ToolDescriptor, ToolParameter, ToolValue};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolInvocation, ToolResult};
