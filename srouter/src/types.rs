//! Routing policy and per-turn result types.

use sprovider::DEFAULT_MODEL;
use stooling::{ToolInvocation, ToolResult};

use crate::RouterErrorKind;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant with access to tools. \
For each user message, either call exactly one of the provided tools when it helps answer, \
or answer directly without calling any tool. Never invent tools that are not listed.";

#[derive(Debug, Clone, PartialEq)]
pub struct RouterPolicy {
    pub model: String,
    pub system_prompt: String,
    pub routing_temperature: f32,
    pub composition_temperature: f32,
    pub max_tokens: Option<u32>,
}

impl RouterPolicy {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            routing_temperature: 0.0,
            composition_temperature: 0.0,
            max_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_routing_temperature(mut self, temperature: f32) -> Self {
        self.routing_temperature = temperature;
        self
    }

    pub fn with_composition_temperature(mut self, temperature: f32) -> Self {
        self.composition_temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl Default for RouterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

/// Which completion request a provider failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPhase {
    Selection,
    Composition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub user_input: String,
    pub reply: String,
    pub selected_tool: Option<String>,
    /// `None` when no tool was selected or the call's arguments were not valid JSON.
    pub invocation: Option<ToolInvocation>,
    pub tool_result: Option<ToolResult>,
    /// Tool calls the model requested beyond the first one. They are never executed.
    pub ignored_tool_calls: usize,
    /// Set when `reply` is a diagnostic produced from a router error.
    pub error: Option<RouterErrorKind>,
}

impl ConversationTurn {
    pub fn direct(user_input: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            reply: reply.into(),
            selected_tool: None,
            invocation: None,
            tool_result: None,
            ignored_tool_calls: 0,
            error: None,
        }
    }

    pub fn diagnostic(
        user_input: impl Into<String>,
        reply: impl Into<String>,
        error: RouterErrorKind,
    ) -> Self {
        Self {
            error: Some(error),
            ..Self::direct(user_input, reply)
        }
    }

    pub fn used_tool(&self) -> bool {
        self.selected_tool.is_some()
    }

    pub fn is_diagnostic(&self) -> bool {
        self.error.is_some()
    }
}
