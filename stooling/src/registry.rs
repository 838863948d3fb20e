//! Tool registry keyed by descriptor name.
//!
//! ```rust
//! use stooling::{ParamType, ToolDescriptor, ToolErrorKind, ToolRegistry, ToolValue};
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(
//!         ToolDescriptor::new("Add", "Adds two numbers")
//!             .param("a", ParamType::Number, "First")
//!             .param("b", ParamType::Number, "Second")
//!             .returns(ParamType::Number),
//!         |args| Ok(ToolValue::Number(args.number("a")? + args.number("b")?)),
//!     )
//!     .expect("name is free");
//!
//! assert!(registry.lookup("Add").is_ok());
//! let missing = registry.lookup("Subtract").err().expect("not registered");
//! assert_eq!(missing.kind, ToolErrorKind::UnknownTool);
//! ```

use std::future::Future;
use std::sync::Arc;

use scommon::Registry;
use sprovider::ToolDefinition;

use crate::{
    FunctionTool, Tool, ToolArguments, ToolDescriptor, ToolError, ToolExecutionContext, ToolValue,
};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: Tool + 'static,
    {
        let name = tool.descriptor().name;
        self.tools
            .try_insert(name.clone(), Arc::new(tool))
            .map_err(|_| {
                ToolError::duplicate_tool(format!("tool '{name}' is already registered"))
                    .with_tool_name(name)
            })
    }

    pub fn register_fn<F, Fut>(
        &mut self,
        descriptor: ToolDescriptor,
        handler: F,
    ) -> Result<(), ToolError>
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolValue, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(descriptor, handler))
    }

    pub fn register_sync_fn<F>(
        &mut self,
        descriptor: ToolDescriptor,
        handler: F,
    ) -> Result<(), ToolError>
    where
        F: Fn(ToolArguments) -> Result<ToolValue, ToolError> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        self.register_fn(descriptor, move |args, _context| {
            let handler = Arc::clone(&handler);
            async move { handler(args) }
        })
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.tools.get(name).cloned().ok_or_else(|| {
            ToolError::unknown_tool(format!("tool '{name}' is not registered")).with_tool_name(name)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Every registered descriptor, sorted by name so prompts stay stable between runs.
    pub fn list_all(&self) -> Vec<ToolDescriptor> {
        let mut descriptors = self
            .tools
            .values()
            .map(|tool| tool.descriptor())
            .collect::<Vec<_>>();
        descriptors.sort_by(|left, right| left.name.cmp(&right.name));
        descriptors
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_all()
            .iter()
            .map(ToolDescriptor::to_definition)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
