use std::sync::{Arc, Mutex};

use chrono::DateTime;
use serde_json::Value;
use switchboard::prelude::*;
use switchboard::sfetch::{FetchError, TransportFuture};
use switchboard::tools::JOKE_APOLOGY;

/// Chooses a tool by keyword on the selection request and reports the tool output verbatim
/// on the composition request.
#[derive(Debug, Default)]
struct KeywordProvider {
    calls: Mutex<usize>,
    unreachable: bool,
}

impl KeywordProvider {
    fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

fn select(user_input: &str) -> Option<(&'static str, &'static str)> {
    if user_input.contains("15 + 25") {
        Some(("Add", r#"{"a":15,"b":25}"#))
    } else if user_input.contains("50% of 200") {
        Some(("Percentage", r#"{"number":200,"percent":50}"#))
    } else if user_input.contains("joke") {
        Some(("GetJoke", "{}"))
    } else if user_input.contains("time") {
        Some(("GetCurrentTime", ""))
    } else {
        None
    }
}

impl ModelProvider for KeywordProvider {
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
            *self.calls.lock().expect("calls lock") += 1;
            if self.unreachable {
                return Err(ProviderError::transport("connection refused"));
            }

            let output = if let Some(tool_output) = request.tool_outputs.first() {
                vec![OutputItem::Message(Message::new(
                    Role::Assistant,
                    format!("Here you go: {}", tool_output.output),
                ))]
            } else {
                let user_input = request
                    .messages
                    .iter()
                    .rev()
                    .find(|message| message.role == Role::User)
                    .map(|message| message.content.clone())
                    .unwrap_or_default();

                match select(&user_input) {
                    Some((name, arguments)) => vec![OutputItem::ToolCall(ToolCall {
                        id: "call_1".to_string(),
                        name: name.to_string(),
                        arguments: arguments.to_string(),
                    })],
                    None => vec![OutputItem::Message(Message::new(
                        Role::Assistant,
                        "Hello! How can I help?",
                    ))],
                }
            };

            Ok(ModelResponse {
                provider: ProviderId::Ollama,
                model: request.model,
                output,
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        })
    }
}

#[derive(Debug)]
struct JokeSource(Result<Value, FetchError>);

impl JokeTransport for JokeSource {
    fn get_json<'a>(
        &'a self,
        _url: &'a str,
        _query: &'a [(String, String)],
    ) -> TransportFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move { self.0.clone() })
    }
}

fn runtime(provider: Arc<KeywordProvider>, jokes: JokeSource) -> SwitchboardRuntime {
    let clock = FixedClock(
        DateTime::parse_from_rfc3339("2024-03-09T08:30:00+00:00").expect("valid timestamp"),
    );

    build_runtime_with(
        SwitchboardConfig::default(),
        RuntimeParts {
            provider,
            joke_transport: Arc::new(jokes),
            clock: Arc::new(clock),
        },
    )
    .expect("runtime builds")
}

async fn run_session(runtime: &SwitchboardRuntime, input: &str) -> (String, usize, SessionState) {
    run_session_bytes(runtime, input.as_bytes()).await
}

async fn run_session_bytes(
    runtime: &SwitchboardRuntime,
    input: &[u8],
) -> (String, usize, SessionState) {
    let mut session = SessionLoop::new(runtime.router.clone(), input, Vec::new());
    let turns = session.run().await.expect("session runs");
    let state = session.state();
    let output = String::from_utf8(session.into_writer()).expect("utf8 output");
    (output, turns, state)
}

fn offline_jokes() -> JokeSource {
    JokeSource(Err(FetchError::remote_unavailable("offline")))
}

#[tokio::test]
async fn exit_terminates_without_calling_the_provider() {
    let provider = Arc::new(KeywordProvider::default());
    let runtime = runtime(provider.clone(), offline_jokes());

    let (output, turns, state) = run_session(&runtime, "  EXIT \nWhat's 15 + 25?\n").await;

    assert_eq!(state, SessionState::Terminated);
    assert_eq!(turns, 0);
    assert_eq!(provider.calls(), 0);
    assert_eq!(output, "You: \n");
}

#[tokio::test]
async fn blank_line_and_end_of_input_terminate() {
    let provider = Arc::new(KeywordProvider::default());
    let runtime = runtime(provider.clone(), offline_jokes());

    for input in ["\n", ""] {
        let (_, turns, state) = run_session(&runtime, input).await;
        assert_eq!(state, SessionState::Terminated);
        assert_eq!(turns, 0);
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn math_questions_are_answered_through_tools() {
    let provider = Arc::new(KeywordProvider::default());
    let runtime = runtime(provider.clone(), offline_jokes());

    let (output, turns, _) =
        run_session(&runtime, "What's 15 + 25?\nCalculate 50% of 200\nexit\n").await;

    assert_eq!(turns, 2);
    assert_eq!(provider.calls(), 4);
    let replies = output
        .lines()
        .filter_map(|line| line.strip_prefix("You: Agent: ").or(line.strip_prefix("Agent: ")))
        .collect::<Vec<_>>();
    assert_eq!(replies, vec!["Here you go: 40", "Here you go: 100"]);
}

#[tokio::test]
async fn direct_answers_and_clock_tools_use_injected_collaborators() {
    let provider = Arc::new(KeywordProvider::default());
    let runtime = runtime(provider.clone(), offline_jokes());

    let (output, turns, _) = run_session(&runtime, "hello\nwhat time is it?\n").await;

    assert_eq!(turns, 2);
    assert!(output.contains("Agent: Hello! How can I help?"));
    assert!(output.contains("Agent: Here you go: 08:30:00"));
}

#[tokio::test]
async fn joke_failures_are_absorbed_into_an_apology() {
    let provider = Arc::new(KeywordProvider::default());
    let runtime = runtime(
        provider,
        JokeSource(Ok(serde_json::json!({"error": true, "message": "No matching joke found"}))),
    );

    let (output, turns, _) = run_session(&runtime, "tell me a joke\n").await;

    assert_eq!(turns, 1);
    assert!(output.contains(JOKE_APOLOGY));
}

#[tokio::test]
async fn unreachable_model_runtime_is_reported_and_the_loop_continues() {
    let provider = Arc::new(KeywordProvider::unreachable());
    let runtime = runtime(provider.clone(), offline_jokes());

    let (output, turns, state) = run_session(&runtime, "hello\nhello again\nexit\n").await;

    assert_eq!(turns, 2);
    assert_eq!(provider.calls(), 2);
    assert_eq!(state, SessionState::Terminated);
    assert_eq!(output.matches("http://localhost:11434/v1").count(), 2);
}

#[tokio::test]
async fn invalid_utf8_lines_are_routed_lossily_and_the_loop_continues() {
    let provider = Arc::new(KeywordProvider::default());
    let runtime = runtime(provider.clone(), offline_jokes());

    let (output, turns, state) =
        run_session_bytes(&runtime, b"caf\xe9 au lait?\nWhat's 15 + 25?\nexit\n").await;

    assert_eq!(state, SessionState::Terminated);
    assert_eq!(turns, 2);
    assert_eq!(provider.calls(), 3);
    assert!(output.contains("Agent: Hello! How can I help?"));
    assert!(output.contains("Agent: Here you go: 40"));
}
