//! Observability hooks for tool execution and intent routing.
//!
//! ```rust
//! use sobserve::{
//!     CompositeHooks, MetricsObservabilityHooks, SafeToolHooks, TracingObservabilityHooks,
//! };
//!
//! let _tool_hooks = SafeToolHooks::new(TracingObservabilityHooks);
//! let _both = CompositeHooks::new(TracingObservabilityHooks, MetricsObservabilityHooks);
//! ```

mod composite;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use composite::CompositeHooks;
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeRouterHooks, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        CompositeHooks, MetricsObservabilityHooks, SafeRouterHooks, SafeToolHooks,
        TracingObservabilityHooks,
    };
}
