//! Time and date tools over an injectable clock.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use stooling::{ToolDescriptor, ToolError, ToolRegistry, ToolValue};

pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_FORMAT: &str = "%A, %B %-d, %Y";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

pub fn register(registry: &mut ToolRegistry, clock: Arc<dyn Clock>) -> Result<(), ToolError> {
    let time_clock = Arc::clone(&clock);
    registry.register_sync_fn(
        ToolDescriptor::new("GetCurrentTime", "Gets the current local time"),
        move |_args| Ok(ToolValue::Text(time_clock.now().format(TIME_FORMAT).to_string())),
    )?;

    registry.register_sync_fn(
        ToolDescriptor::new("GetCurrentDate", "Gets the current local date"),
        move |_args| Ok(ToolValue::Text(clock.now().format(DATE_FORMAT).to_string())),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::Map;
    use stooling::{DefaultToolExecutor, ToolExecutionContext, ToolExecutor, ToolInvocation};

    use super::*;

    fn fixed() -> FixedClock {
        FixedClock(
            DateTime::parse_from_rfc3339("2024-03-09T14:05:07+01:00").expect("valid timestamp"),
        )
    }

    async fn run(name: &str) -> String {
        let mut registry = ToolRegistry::new();
        register(&mut registry, Arc::new(fixed())).expect("clock tools register");
        let executor = DefaultToolExecutor::new(Arc::new(registry));

        executor
            .execute(
                ToolInvocation::new("call_1", name, Map::new()),
                ToolExecutionContext::default(),
            )
            .await
            .expect("clock tool runs")
            .to_model_output()
    }

    #[tokio::test]
    async fn time_and_date_use_the_injected_clock() {
        assert_eq!(run("GetCurrentTime").await, "14:05:07");
        assert_eq!(run("GetCurrentDate").await, "Saturday, March 9, 2024");
    }

    #[test]
    fn system_clock_is_close_to_now() {
        let drift = Local::now().fixed_offset() - SystemClock.now();
        assert!(drift.num_seconds().abs() < 5);
    }
}
