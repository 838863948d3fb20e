//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use stooling::{FunctionTool, ParamType, Tool, ToolDescriptor, ToolValue};
//!
//! let tool = FunctionTool::new(
//!     ToolDescriptor::new("Echo", "Echoes input").param("text", ParamType::String, "Text"),
//!     |args, _ctx| async move { args.text("text").map(ToolValue::text) },
//! );
//!
//! assert_eq!(tool.descriptor().name, "Echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use scommon::BoxFuture;

use crate::{ToolArguments, ToolDescriptor, ToolError, ToolExecutionContext, ToolValue};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    /// Runs the tool with arguments already validated against [`Tool::descriptor`].
    fn invoke<'a>(
        &'a self,
        args: ToolArguments,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolValue, ToolError>>;
}

type ToolHandler = dyn Fn(
        ToolArguments,
        ToolExecutionContext,
    ) -> ToolFuture<'static, Result<ToolValue, ToolError>>
    + Send
    + Sync;

pub struct FunctionTool {
    descriptor: ToolDescriptor,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(descriptor: ToolDescriptor, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolValue, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |args, context| Box::pin(handler(args, context)));

        Self {
            descriptor,
            handler,
        }
    }
}

impl Tool for FunctionTool {
    fn descriptor(&self) -> ToolDescriptor {
        self.descriptor.clone()
    }

    fn invoke<'a>(
        &'a self,
        args: ToolArguments,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolValue, ToolError>> {
        (self.handler)(args, context.clone())
    }
}
