//! Two-step routing: tool selection, then reply composition.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use srouter::{IntentRouter, RouterPolicy};
//! use sprovider::ModelProvider;
//! use stooling::{DefaultToolExecutor, ToolRegistry};
//!
//! fn build(provider: Arc<dyn ModelProvider>) -> IntentRouter {
//!     let executor = Arc::new(DefaultToolExecutor::new(Arc::new(ToolRegistry::new())));
//!     IntentRouter::builder(provider, executor)
//!         .policy(RouterPolicy::new("llama3.2"))
//!         .build()
//! }
//! ```

use std::sync::Arc;
use std::time::Instant;

use scommon::SessionId;
use sprovider::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderError, Role,
    ToolOutput,
};
use stooling::{
    ToolDescriptor, ToolError, ToolExecutionContext, ToolExecutor, ToolInvocation, ToolResult,
};

use crate::{
    ConversationTurn, NoopRouterHooks, RouterError, RouterErrorKind, RouterHooks, RouterPhase,
    RouterPolicy,
};

#[derive(Clone)]
pub struct IntentRouter {
    provider: Arc<dyn ModelProvider>,
    executor: Arc<dyn ToolExecutor>,
    policy: RouterPolicy,
    hooks: Arc<dyn RouterHooks>,
    session_id: SessionId,
}

pub struct IntentRouterBuilder {
    provider: Arc<dyn ModelProvider>,
    executor: Arc<dyn ToolExecutor>,
    policy: Option<RouterPolicy>,
    hooks: Arc<dyn RouterHooks>,
    session_id: SessionId,
}

impl IntentRouterBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>, executor: Arc<dyn ToolExecutor>) -> Self {
        Self {
            provider,
            executor,
            policy: None,
            hooks: Arc::new(NoopRouterHooks),
            session_id: SessionId::default(),
        }
    }

    pub fn policy(mut self, policy: RouterPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn RouterHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn build(self) -> IntentRouter {
        IntentRouter {
            provider: self.provider,
            executor: self.executor,
            policy: self.policy.unwrap_or_default(),
            hooks: self.hooks,
            session_id: self.session_id,
        }
    }
}

impl IntentRouter {
    pub fn builder(
        provider: Arc<dyn ModelProvider>,
        executor: Arc<dyn ToolExecutor>,
    ) -> IntentRouterBuilder {
        IntentRouterBuilder::new(provider, executor)
    }

    pub fn policy(&self) -> &RouterPolicy {
        &self.policy
    }

    pub fn endpoint(&self) -> String {
        self.provider.endpoint()
    }

    pub async fn route(&self, user_input: &str) -> Result<ConversationTurn, RouterError> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(RouterError::invalid_input("user input must not be empty"));
        }

        let started = Instant::now();
        let conversation = vec![
            Message::new(Role::System, self.policy.system_prompt.clone()),
            Message::new(Role::User, user_input),
        ];

        let selection_request = self
            .request_builder(conversation.clone(), self.policy.routing_temperature)
            .tools(
                self.executor
                    .descriptors()
                    .iter()
                    .map(ToolDescriptor::to_definition)
                    .collect(),
            )
            .build()?;
        let selection = self
            .complete(RouterPhase::Selection, selection_request)
            .await?;

        let calls = selection.tool_calls();
        let ignored_tool_calls = calls.len().saturating_sub(1);
        let selected = calls.first().map(|call| (*call).clone());
        self.hooks.on_selection(selected.as_ref(), ignored_tool_calls);

        let Some(call) = selected else {
            let turn = ConversationTurn::direct(user_input, selection.text());
            self.hooks.on_turn_complete(&turn, started.elapsed());
            return Ok(turn);
        };

        // Rejected calls keep no invocation; the failure still reaches composition.
        let (invocation, tool_result) = match ToolInvocation::from_call(&call) {
            Ok(invocation) => match self.execute(invocation.clone()).await {
                Ok(result) => (Some(invocation), result),
                Err(error) => (None, ToolResult::from(error)),
            },
            Err(error) => (None, ToolResult::from(error)),
        };
        let tool_output = tool_result.to_model_output();

        let mut messages = conversation;
        messages.push(Message::assistant_tool_calls(
            selection.text(),
            vec![call.clone()],
        ));
        let composition_request = self
            .request_builder(messages, self.policy.composition_temperature)
            .tool_outputs(vec![ToolOutput {
                tool_call_id: call.id.clone(),
                output: tool_output.clone(),
            }])
            .build()?;
        let composition = self
            .complete(RouterPhase::Composition, composition_request)
            .await?;

        let composed = composition.text();
        let reply = if composed.trim().is_empty() {
            tool_output
        } else {
            composed
        };

        let turn = ConversationTurn {
            user_input: user_input.to_string(),
            reply,
            selected_tool: Some(call.name),
            invocation,
            tool_result: Some(tool_result),
            ignored_tool_calls,
            error: None,
        };
        self.hooks.on_turn_complete(&turn, started.elapsed());
        Ok(turn)
    }

    /// Like [`IntentRouter::route`], but turns every error into a user-facing reply.
    pub async fn respond(&self, user_input: &str) -> ConversationTurn {
        match self.route(user_input).await {
            Ok(turn) => turn,
            Err(error) => ConversationTurn::diagnostic(
                user_input.trim(),
                self.diagnostic(&error),
                error.kind,
            ),
        }
    }

    fn diagnostic(&self, error: &RouterError) -> String {
        if error.is_unreachable() {
            return format!(
                "I couldn't reach the language model at {}. Make sure the local model runtime \
                 is running and the model '{}' has been pulled. ({})",
                self.endpoint(),
                self.policy.model,
                error.message
            );
        }

        match error.kind {
            RouterErrorKind::InvalidInput => {
                format!("I couldn't process that input: {}", error.message)
            }
            RouterErrorKind::Provider => format!(
                "The language model at {} returned an error: {}",
                self.endpoint(),
                error.message
            ),
        }
    }

    fn request_builder(&self, messages: Vec<Message>, temperature: f32) -> ModelRequestBuilder {
        let mut builder = ModelRequest::builder(self.policy.model.clone())
            .messages(messages)
            .temperature(temperature);
        if let Some(max_tokens) = self.policy.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        builder
    }

    async fn complete(
        &self,
        phase: RouterPhase,
        request: ModelRequest,
    ) -> Result<ModelResponse, RouterError> {
        self.provider
            .complete(request)
            .await
            .map_err(|error: ProviderError| {
                self.hooks.on_completion_failure(phase, &error);
                RouterError::from(error)
            })
    }

    async fn execute(&self, invocation: ToolInvocation) -> Result<ToolResult, ToolError> {
        let context = ToolExecutionContext::new(self.session_id.clone());
        self.executor.execute(invocation, context).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use sprovider::{OutputItem, ProviderFuture, ProviderId, StopReason, TokenUsage, ToolCall};
    use stooling::{DefaultToolExecutor, ParamType, ToolRegistry, ToolValue};

    use super::*;

    #[derive(Debug)]
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<ModelResponse, ProviderError>>>,
        requests: Mutex<Vec<ModelRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<ModelResponse, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ModelRequest> {
            self.requests.lock().expect("requests lock").clone()
        }
    }

    impl ModelProvider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Ollama
        }

        fn endpoint(&self) -> String {
            "http://localhost:11434/v1".to_string()
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                self.requests.lock().expect("requests lock").push(request);
                self.responses
                    .lock()
                    .expect("responses lock")
                    .pop_front()
                    .unwrap_or_else(|| Err(ProviderError::other("no scripted response left")))
            })
        }
    }

    fn response(output: Vec<OutputItem>) -> Result<ModelResponse, ProviderError> {
        Ok(ModelResponse {
            provider: ProviderId::Ollama,
            model: "llama3.2".to_string(),
            output,
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        })
    }

    fn text(content: &str) -> OutputItem {
        OutputItem::Message(Message::new(Role::Assistant, content))
    }

    fn call(id: &str, name: &str, arguments: &str) -> OutputItem {
        OutputItem::ToolCall(ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        })
    }

    fn math_executor() -> Arc<DefaultToolExecutor> {
        let mut registry = ToolRegistry::new();
        registry
            .register_sync_fn(
                ToolDescriptor::new("Add", "Adds two numbers")
                    .param("a", ParamType::Number, "First")
                    .param("b", ParamType::Number, "Second")
                    .returns(ParamType::Number),
                |args| Ok(ToolValue::Number(args.number("a")? + args.number("b")?)),
            )
            .expect("register Add");
        Arc::new(DefaultToolExecutor::new(Arc::new(registry)))
    }

    fn router(provider: Arc<ScriptedProvider>) -> IntentRouter {
        IntentRouter::builder(provider, math_executor())
            .policy(RouterPolicy::new("llama3.2"))
            .build()
    }

    #[tokio::test]
    async fn direct_answers_skip_tool_execution() {
        let provider = Arc::new(ScriptedProvider::new(vec![response(vec![text("Hello there!")])]));
        let router = router(provider.clone());

        let turn = router.route("hi").await.expect("route should succeed");

        assert_eq!(turn.reply, "Hello there!");
        assert!(!turn.used_tool());
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tools.len(), 1);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert_eq!(requests[0].options.temperature, Some(0.0));
    }

    #[tokio::test]
    async fn composition_request_carries_tool_output_and_no_tools() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            response(vec![call("call_1", "Add", r#"{"a":15,"b":25}"#)]),
            response(vec![text("15 + 25 = 40")]),
        ]));
        let router = router(provider.clone());

        let turn = router.route("What's 15 + 25?").await.expect("route should succeed");

        assert_eq!(turn.reply, "15 + 25 = 40");
        assert_eq!(turn.selected_tool.as_deref(), Some("Add"));
        assert_eq!(turn.tool_result, Some(ToolResult::Success(ToolValue::Number(40.0))));
        assert_eq!(
            turn.invocation.as_ref().map(|invocation| invocation.arguments.len()),
            Some(2)
        );

        let requests = provider.requests();
        let composition = &requests[1];
        assert!(composition.tools.is_empty());
        assert_eq!(composition.tool_outputs[0].tool_call_id, "call_1");
        assert_eq!(composition.tool_outputs[0].output, "40");
        assert_eq!(composition.messages.last().map(|m| m.tool_calls.len()), Some(1));
    }

    #[tokio::test]
    async fn empty_composition_falls_back_to_tool_output() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            response(vec![call("call_1", "Add", r#"{"a":1,"b":2}"#)]),
            response(vec![text("   ")]),
        ]));

        let turn = router(provider).route("1+2").await.expect("route should succeed");
        assert_eq!(turn.reply, "3");
    }

    #[tokio::test]
    async fn only_the_first_tool_call_runs() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            response(vec![
                call("call_1", "Add", r#"{"a":1,"b":1}"#),
                call("call_2", "Add", r#"{"a":5,"b":5}"#),
            ]),
            response(vec![text("2")]),
        ]));

        let turn = router(provider.clone()).route("add").await.expect("route should succeed");

        assert_eq!(turn.ignored_tool_calls, 1);
        assert_eq!(turn.tool_result, Some(ToolResult::Success(ToolValue::Number(2.0))));
        assert_eq!(provider.requests()[1].tool_outputs.len(), 1);
    }

    #[tokio::test]
    async fn invalid_calls_flow_into_composition_as_failures() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            response(vec![call("call_1", "Teleport", "{}")]),
            response(vec![text("I can't do that.")]),
        ]));

        let turn = router(provider.clone())
            .route("beam me up")
            .await
            .expect("route should succeed");

        assert_eq!(turn.selected_tool.as_deref(), Some("Teleport"));
        assert_eq!(turn.invocation, None);
        assert!(matches!(turn.tool_result, Some(ToolResult::Failure(_))));
        assert!(provider.requests()[1].tool_outputs[0].output.contains("Teleport"));
        assert_eq!(turn.reply, "I can't do that.");
    }

    #[tokio::test]
    async fn respond_turns_unreachable_provider_into_diagnostic() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::transport(
            "connection refused",
        ))]));
        let error = router(provider).route("hi").await.expect_err("route should fail");
        assert_eq!(error.kind, RouterErrorKind::Provider);

        let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::transport(
            "connection refused",
        ))]));
        let turn = router(provider).respond("hi").await;
        assert_eq!(turn.error, Some(RouterErrorKind::Provider));
        assert!(turn.reply.contains("http://localhost:11434/v1"));
        assert!(turn.reply.contains("llama3.2"));
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_calling_the_provider() {
        let provider = Arc::new(ScriptedProvider::new(Vec::new()));
        let error = router(provider.clone())
            .route("   ")
            .await
            .expect_err("route should fail");

        assert_eq!(error.kind, RouterErrorKind::InvalidInput);
        assert!(provider.requests().is_empty());
    }
}
