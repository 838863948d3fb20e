//! Console assistant that lets a local model route questions to built-in tools.
//!
//! This crate wires the workspace crates together and re-exports their most used types,
//! so applications and integration tests need a single dependency.

pub mod config;
pub mod prelude;
pub mod runtime;
pub mod session;
pub mod tools;

pub use scommon;
pub use sfetch;
pub use sobserve;
pub use sprovider;
pub use srouter;
pub use stooling;

pub use config::{ConfigError, ConfigErrorKind, SwitchboardConfig};
pub use runtime::{
    ProbeOutcome, RuntimeError, RuntimeErrorKind, RuntimeParts, SwitchboardRuntime,
    build_runtime, build_runtime_with, probe_model_runtime,
};
pub use session::{
    AGENT_PREFIX, InputAction, SessionLoop, SessionState, USER_PROMPT, classify_input,
};
pub use srouter::{ConversationTurn, IntentRouter, RouterError, RouterErrorKind, RouterPolicy};
pub use stooling::{ToolRegistry, ToolResult, ToolValue};
