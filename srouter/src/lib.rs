//! Intent routing: let the model pick a tool, run it, and compose the reply.

mod error;
mod hooks;
mod router;
mod types;

pub mod prelude {
    pub use crate::{
        ConversationTurn, IntentRouter, IntentRouterBuilder, NoopRouterHooks, RouterError,
        RouterErrorKind, RouterHooks, RouterPhase, RouterPolicy,
    };
    pub use scommon::SessionId;
    pub use stooling::{ToolExecutor, ToolResult};
}

pub use error::{RouterError, RouterErrorKind};
pub use hooks::{NoopRouterHooks, RouterHooks};
pub use router::{IntentRouter, IntentRouterBuilder};
pub use types::{ConversationTurn, DEFAULT_SYSTEM_PROMPT, RouterPhase, RouterPolicy};
