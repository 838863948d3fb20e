//! Execution context, invocation, and result types.

use scommon::SessionId;
use serde_json::{Map, Value};
use sprovider::ToolCall;

use crate::{ToolError, ToolValue, parse_json_object};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// A request to run one registered tool with literal argument values.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub call_id: String,
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    pub fn new(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: Map<String, Value>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Builds an invocation from a model tool call. Malformed JSON is an argument mismatch.
    pub fn from_call(call: &ToolCall) -> Result<Self, ToolError> {
        let arguments = parse_json_object(&call.arguments).map_err(|err| {
            err.with_tool_name(call.name.clone())
                .with_tool_call_id(call.id.clone())
        })?;

        Ok(Self::new(call.id.clone(), call.name.clone(), arguments))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success(ToolValue),
    Failure(String),
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Text handed back to the model for composing the final reply.
    pub fn to_model_output(&self) -> String {
        match self {
            Self::Success(value) => value.to_string(),
            Self::Failure(reason) => format!("The tool call failed: {reason}"),
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(value: ToolError) -> Self {
        Self::Failure(value.message)
    }
}
