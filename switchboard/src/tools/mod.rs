//! Built-in tools offered to the model.

pub mod clock;
pub mod joke;
pub mod math;

use std::sync::Arc;

use sfetch::{JokeFetcher, JokeFilter};
use stooling::{ToolError, ToolRegistry};

pub use clock::{Clock, FixedClock, SystemClock};
pub use joke::{JOKE_APOLOGY, JokeTool};

/// Registers every built-in tool. Fails on the first duplicate name.
pub fn register_default_tools(
    registry: &mut ToolRegistry,
    clock: Arc<dyn Clock>,
    fetcher: JokeFetcher,
    filter: JokeFilter,
) -> Result<(), ToolError> {
    math::register(registry)?;
    clock::register(registry, clock)?;
    registry.register(JokeTool::new(fetcher, filter))
}
