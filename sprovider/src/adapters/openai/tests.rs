//! Focused unit tests for chat completions adapter internals.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::adapters::ollama::OllamaProvider;
use crate::{
    Message, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture, Role, ToolCall,
    ToolDefinition, ToolOutput,
};

use super::serde_api::{OpenAiApiResponse, build_api_request, parse_finish_reason};
use super::transport::{OpenAiTransport, classify_status};
use super::types::{OpenAiFinishReason, OpenAiRequest, OpenAiResponse, OpenAiRole};

#[derive(Debug)]
struct NoopTransport;

impl OpenAiTransport for NoopTransport {
    fn base_url(&self) -> &str {
        "http://localhost:11434/v1"
    }

    fn complete<'a>(
        &'a self,
        _request: OpenAiRequest,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn composition_request() -> ModelRequest {
    let call = ToolCall {
        id: "call_1".to_string(),
        name: "Add".to_string(),
        arguments: "{\"a\":15,\"b\":25}".to_string(),
    };

    ModelRequest::new(
        "llama3.2",
        vec![
            Message::new(Role::User, "What's 15 + 25?"),
            Message::assistant_tool_calls("", vec![call]),
        ],
    )
    .with_tool_outputs(vec![ToolOutput {
        tool_call_id: "call_1".to_string(),
        output: "40".to_string(),
    }])
}

#[test]
fn build_request_appends_tool_outputs_as_tool_messages() {
    let provider = OllamaProvider::new(Arc::new(NoopTransport));

    let built = provider.build_request(composition_request());
    assert_eq!(built.messages.len(), 3);
    assert_eq!(built.messages[1].role, OpenAiRole::Assistant);
    assert_eq!(built.messages[1].tool_calls.len(), 1);
    assert_eq!(built.messages[2].role, OpenAiRole::Tool);
    assert_eq!(built.messages[2].tool_call_id.as_deref(), Some("call_1"));
}

#[test]
fn build_request_uses_fallback_model_when_blank() {
    let provider = OllamaProvider::new(Arc::new(NoopTransport)).with_fallback_model("qwen2.5");
    let mut request = ModelRequest::new("x", vec![Message::new(Role::User, "hi")]);
    request.model = " ".to_string();

    assert_eq!(provider.build_request(request).model, "qwen2.5");
}

#[test]
fn api_request_serializes_tools_and_assistant_tool_calls() {
    let provider = OllamaProvider::new(Arc::new(NoopTransport));
    let request = composition_request().with_tools(vec![ToolDefinition {
        name: "Add".to_string(),
        description: "Adds two numbers".to_string(),
        input_schema: "{\"type\":\"object\"}".to_string(),
    }]);

    let api = build_api_request(provider.build_request(request)).expect("request should build");
    let json = serde_json::to_value(&api).expect("request should serialize");

    assert_eq!(json["stream"], false);
    assert_eq!(json["tools"][0]["type"], "function");
    assert_eq!(json["tools"][0]["function"]["name"], "Add");
    assert_eq!(json["messages"][1]["tool_calls"][0]["function"]["name"], "Add");
    assert!(json["messages"][0].get("tool_calls").is_none());
    assert_eq!(json["messages"][2]["role"], "tool");
}

#[test]
fn api_request_rejects_invalid_tool_schema() {
    let provider = OllamaProvider::new(Arc::new(NoopTransport));
    let request = ModelRequest::new("llama3.2", vec![Message::new(Role::User, "hi")]).with_tools(
        vec![ToolDefinition {
            name: "Broken".to_string(),
            description: "Broken schema".to_string(),
            input_schema: "{not json".to_string(),
        }],
    );

    let error = build_api_request(provider.build_request(request)).expect_err("should fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn response_accepts_object_arguments_and_missing_call_ids() {
    let body = r#"{
        "model": "llama3.2",
        "choices": [{
            "message": {
                "content": "",
                "tool_calls": [{
                    "function": {
                        "name": "Percentage",
                        "arguments": {"number": 200, "percent": 50}
                    }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    }"#;

    let parsed: OpenAiApiResponse = serde_json::from_str(body).expect("body should parse");
    let response = OpenAiResponse::try_from(parsed).expect("response should convert");

    assert_eq!(response.finish_reason, OpenAiFinishReason::ToolCalls);
    assert_eq!(response.message.tool_calls[0].id, "tool_call_0");
    let args: serde_json::Value =
        serde_json::from_str(&response.message.tool_calls[0].arguments).expect("json arguments");
    assert_eq!(args["number"], 200);
}

#[test]
fn response_without_choices_is_transport_error() {
    let parsed: OpenAiApiResponse =
        serde_json::from_str(r#"{"model":"llama3.2","choices":[]}"#).expect("body should parse");

    let error = OpenAiResponse::try_from(parsed).expect_err("should fail");
    assert_eq!(error.kind, ProviderErrorKind::Transport);
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("stop")), OpenAiFinishReason::Stop);
    assert_eq!(
        parse_finish_reason(Some("length")),
        OpenAiFinishReason::Length
    );
    assert_eq!(
        parse_finish_reason(Some("tool_calls")),
        OpenAiFinishReason::ToolCalls
    );
    assert_eq!(parse_finish_reason(None), OpenAiFinishReason::Other);
}

#[test]
fn http_status_classification_matches_error_kinds() {
    let cases = [
        (StatusCode::UNAUTHORIZED, ProviderErrorKind::Authentication),
        (StatusCode::TOO_MANY_REQUESTS, ProviderErrorKind::RateLimited),
        (StatusCode::GATEWAY_TIMEOUT, ProviderErrorKind::Timeout),
        (StatusCode::NOT_FOUND, ProviderErrorKind::InvalidRequest),
        (StatusCode::SERVICE_UNAVAILABLE, ProviderErrorKind::Unavailable),
        (StatusCode::INTERNAL_SERVER_ERROR, ProviderErrorKind::Transport),
    ];

    for (status, kind) in cases {
        assert_eq!(classify_status(status, "x".to_string()).kind, kind);
    }
}
