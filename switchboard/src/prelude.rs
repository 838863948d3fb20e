//! Common `switchboard` imports.

pub use crate::tools::{Clock, FixedClock, SystemClock};
pub use crate::{
    ConversationTurn, IntentRouter, RuntimeParts, SessionLoop, SessionState, SwitchboardConfig,
    SwitchboardRuntime, build_runtime, build_runtime_with,
};
pub use sfetch::{JokeFilter, JokeTransport};
pub use sprovider::prelude::*;
pub use stooling::prelude::*;
