//! Tool executor trait and default registry-backed executor.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_timer::Delay;
use futures_util::FutureExt;
use futures_util::future::{Either, select};

use crate::{
    NoopToolRuntimeHooks, ToolArguments, ToolDescriptor, ToolError, ToolExecutionContext,
    ToolFuture, ToolInvocation, ToolRegistry, ToolResult, ToolRuntimeHooks,
};

pub trait ToolExecutor: Send + Sync {
    fn descriptors(&self) -> Vec<ToolDescriptor>;

    /// Runs an invocation. `Err` is reserved for unknown tools and argument mismatches;
    /// failures inside the tool come back as [`ToolResult::Failure`].
    fn execute<'a>(
        &'a self,
        invocation: ToolInvocation,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolResult, ToolError>>;
}

#[derive(Clone)]
pub struct DefaultToolExecutor {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
    timeout: Option<Duration>,
}

impl DefaultToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
            timeout: None,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn run(
        &self,
        invocation: &ToolInvocation,
        context: &ToolExecutionContext,
    ) -> Result<ToolResult, ToolError> {
        let tag = |error: ToolError| {
            error
                .with_tool_name(invocation.name.clone())
                .with_tool_call_id(invocation.call_id.clone())
        };

        let tool = self.registry.lookup(&invocation.name).map_err(tag)?;
        let descriptor = tool.descriptor();
        let arguments = ToolArguments::validate(&descriptor, &invocation.arguments).map_err(tag)?;

        let call = AssertUnwindSafe(async { tool.invoke(arguments, context).await }).catch_unwind();
        let outcome = match self.timeout {
            Some(limit) => match select(Box::pin(call), Delay::new(limit)).await {
                Either::Left((outcome, _)) => Some(outcome),
                Either::Right(((), _)) => None,
            },
            None => Some(call.await),
        };

        let result = match outcome {
            None => Err(ToolError::timeout(format!(
                "tool '{}' did not finish within {} ms",
                invocation.name,
                self.timeout.unwrap_or_default().as_millis()
            ))),
            Some(Err(panic)) => Err(ToolError::execution(format!(
                "tool '{}' panicked: {}",
                invocation.name,
                panic_message(panic.as_ref())
            ))),
            Some(Ok(result)) => result,
        };

        result.map(ToolResult::Success).or_else(|error| {
            // Implementation faults are absorbed so the session keeps going.
            Ok(ToolResult::Failure(tag(error).message))
        })
    }
}

impl ToolExecutor for DefaultToolExecutor {
    fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.registry.list_all()
    }

    fn execute<'a>(
        &'a self,
        invocation: ToolInvocation,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolResult, ToolError>> {
        Box::pin(async move {
            let started = Instant::now();
            self.hooks.on_execution_start(&invocation, &context);

            let outcome = self.run(&invocation, &context).await;
            let elapsed = started.elapsed();

            match &outcome {
                Ok(ToolResult::Success(value)) => {
                    self.hooks
                        .on_execution_success(&invocation, &context, value, elapsed);
                }
                Ok(ToolResult::Failure(reason)) => {
                    let error = ToolError::execution(reason.clone())
                        .with_tool_name(invocation.name.clone())
                        .with_tool_call_id(invocation.call_id.clone());
                    self.hooks
                        .on_execution_failure(&invocation, &context, &error, elapsed);
                }
                Err(error) => {
                    self.hooks
                        .on_execution_failure(&invocation, &context, error, elapsed);
                }
            }

            outcome
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }

    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }

    "unknown panic payload".to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::{Map, Value, json};

    use super::*;
    use crate::{ParamType, Tool, ToolErrorKind, ToolValue};

    #[derive(Debug)]
    struct EchoTool;

    impl Tool for EchoTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor::new("Echo", "Echoes text").param("text", ParamType::String, "Text")
        }

        fn invoke<'a>(
            &'a self,
            args: ToolArguments,
            context: &'a ToolExecutionContext,
        ) -> ToolFuture<'a, Result<ToolValue, ToolError>> {
            Box::pin(async move {
                Ok(ToolValue::Text(format!(
                    "session={} text={}",
                    context.session_id,
                    args.text("text")?
                )))
            })
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ToolRuntimeHooks for RecordingHooks {
        fn on_execution_start(&self, invocation: &ToolInvocation, _context: &ToolExecutionContext) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{}", invocation.name));
        }

        fn on_execution_success(
            &self,
            invocation: &ToolInvocation,
            _context: &ToolExecutionContext,
            _value: &ToolValue,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{}", invocation.name));
        }

        fn on_execution_failure(
            &self,
            invocation: &ToolInvocation,
            _context: &ToolExecutionContext,
            error: &ToolError,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{}:{:?}", invocation.name, error.kind));
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    fn executor_with(register: impl FnOnce(&mut ToolRegistry)) -> DefaultToolExecutor {
        let mut registry = ToolRegistry::new();
        register(&mut registry);
        DefaultToolExecutor::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn executes_registered_tool_with_validated_arguments() {
        let executor = executor_with(|registry| registry.register(EchoTool).expect("register"));

        let result = executor
            .execute(
                ToolInvocation::new("call_1", "Echo", object(json!({"text": "hello"}))),
                ToolExecutionContext::new("session-1"),
            )
            .await
            .expect("execution should succeed");

        assert_eq!(
            result,
            ToolResult::Success(ToolValue::text("session=session-1 text=hello"))
        );
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_not_a_failure_result() {
        let executor = executor_with(|_| {});

        let error = executor
            .execute(
                ToolInvocation::new("call_2", "Missing", Map::new()),
                ToolExecutionContext::new("session-2"),
            )
            .await
            .expect_err("execution should fail");

        assert_eq!(error.kind, ToolErrorKind::UnknownTool);
        assert_eq!(error.tool_call_id.as_deref(), Some("call_2"));
    }

    #[tokio::test]
    async fn argument_mismatch_is_reported_before_the_tool_runs() {
        let calls = Arc::new(Mutex::new(0_u32));
        let seen = Arc::clone(&calls);
        let executor = executor_with(move |registry| {
            registry
                .register_sync_fn(
                    ToolDescriptor::new("Add", "Adds")
                        .param("a", ParamType::Number, "a")
                        .param("b", ParamType::Number, "b"),
                    move |_args| {
                        *seen.lock().expect("calls lock") += 1;
                        Ok(ToolValue::Number(0.0))
                    },
                )
                .expect("register");
        });

        let error = executor
            .execute(
                ToolInvocation::new("call_3", "Add", object(json!({"a": 1}))),
                ToolExecutionContext::new("session-3"),
            )
            .await
            .expect_err("mismatch should fail");

        assert_eq!(error.kind, ToolErrorKind::ArgumentMismatch);
        assert_eq!(*calls.lock().expect("calls lock"), 0);
    }

    #[tokio::test]
    async fn tool_errors_and_panics_become_failure_results() {
        let executor = executor_with(|registry| {
            registry
                .register_sync_fn(ToolDescriptor::new("Broken", "Always fails"), |_args| {
                    Err(ToolError::execution("tool exploded"))
                })
                .expect("register Broken");
            registry
                .register_sync_fn(ToolDescriptor::new("Panicky", "Always panics"), |_args| {
                    panic!("bad state")
                })
                .expect("register Panicky");
        });

        let broken = executor
            .execute(
                ToolInvocation::new("call_4", "Broken", Map::new()),
                ToolExecutionContext::new("session-4"),
            )
            .await
            .expect("failure is absorbed");
        assert_eq!(broken, ToolResult::Failure("tool exploded".to_string()));

        let panicky = executor
            .execute(
                ToolInvocation::new("call_5", "Panicky", Map::new()),
                ToolExecutionContext::new("session-4"),
            )
            .await
            .expect("panic is absorbed");
        match panicky {
            ToolResult::Failure(reason) => assert!(reason.contains("bad state")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_tools_time_out_into_failure_results() {
        let executor = executor_with(|registry| {
            registry
                .register_fn(ToolDescriptor::new("Slow", "Sleeps"), |_args, _ctx| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(ToolValue::text("late"))
                })
                .expect("register Slow");
        })
        .with_timeout(Duration::from_millis(20));

        let result = executor
            .execute(
                ToolInvocation::new("call_6", "Slow", Map::new()),
                ToolExecutionContext::new("session-5"),
            )
            .await
            .expect("timeout is absorbed");

        match result {
            ToolResult::Failure(reason) => assert!(reason.contains("did not finish")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn hooks_observe_success_and_failure() {
        let hooks = Arc::new(RecordingHooks::default());
        let executor = executor_with(|registry| registry.register(EchoTool).expect("register"))
            .with_hooks(hooks.clone());

        let _ = executor
            .execute(
                ToolInvocation::new("call_7", "Echo", object(json!({"text": "hi"}))),
                ToolExecutionContext::new("session-6"),
            )
            .await;
        let _ = executor
            .execute(
                ToolInvocation::new("call_8", "Nope", Map::new()),
                ToolExecutionContext::new("session-6"),
            )
            .await;

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![
                "start:Echo".to_string(),
                "success:Echo".to_string(),
                "start:Nope".to_string(),
                "failure:Nope:UnknownTool".to_string(),
            ]
        );
        assert_eq!(executor.descriptors().len(), 1);
    }
}
