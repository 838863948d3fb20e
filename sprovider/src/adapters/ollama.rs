//! Ollama provider implemented over the OpenAI-compatible transport.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;

use crate::adapters::openai::{
    OpenAiHttpTransport, OpenAiMessage, OpenAiRequest, OpenAiTool, OpenAiTransport,
    map_send_error,
};
use crate::{
    DEFAULT_MODEL, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    ProviderId,
};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

#[derive(Clone)]
pub struct OllamaProvider {
    transport: Arc<dyn OpenAiTransport>,
    fallback_model: String,
}

impl OllamaProvider {
    pub fn new(transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            transport,
            fallback_model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub fn http_transport(client: Client, base_url: impl Into<String>) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client, base_url)
    }

    pub(crate) fn build_request(&self, request: ModelRequest) -> OpenAiRequest {
        let model = if request.model.trim().is_empty() {
            self.fallback_model.clone()
        } else {
            request.model
        };

        let mut messages = request
            .messages
            .into_iter()
            .map(OpenAiMessage::from)
            .collect::<Vec<_>>();

        for tool_output in request.tool_outputs {
            messages.push(OpenAiMessage::tool_output(tool_output));
        }

        let tools = request
            .tools
            .into_iter()
            .map(OpenAiTool::from)
            .collect::<Vec<_>>();

        OpenAiRequest {
            model,
            messages,
            tools,
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }
}

impl ModelProvider for OllamaProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Ollama
    }

    fn endpoint(&self) -> String {
        self.transport.base_url().to_string()
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let ollama_request = self.build_request(request);
            let response = self.transport.complete(ollama_request).await?;
            Ok(response.into_model_response(ProviderId::Ollama))
        })
    }
}

/// Native Ollama host for a chat completions base URL (`.../v1` is stripped).
pub fn ollama_host_from_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed
        .strip_suffix("/v1")
        .unwrap_or(trimmed)
        .to_string()
}

/// Lists the models pulled into the local runtime through `GET /api/tags`.
pub async fn list_ollama_models(
    client: &Client,
    host_url: &str,
) -> Result<Vec<String>, ProviderError> {
    let endpoint = format!("{}/api/tags", host_url.trim_end_matches('/'));

    let response = client.get(endpoint).send().await.map_err(map_send_error)?;

    if !response.status().is_success() {
        let code = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::transport(format!(
            "http {code}: {}",
            truncate(&body, 4096)
        )));
    }

    let parsed = response
        .json::<OllamaTagsResponse>()
        .await
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let mut ids = parsed
        .models
        .into_iter()
        .map(|m| m.name)
        .collect::<Vec<_>>();
    ids.sort();
    Ok(ids)
}

/// Ollama tags carry an implicit `:latest` suffix that users usually omit.
pub fn model_is_available(available: &[String], model: &str) -> bool {
    available
        .iter()
        .any(|name| name == model || name.strip_suffix(":latest") == Some(model))
}

fn truncate(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let mut output = input[..end].to_string();
    output.push_str("...");
    output
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}
