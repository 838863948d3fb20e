//! Runtime wiring: HTTP clients, provider, tools, hooks, and router.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use reqwest::Client;
use sfetch::{HttpJokeTransport, JokeFetcher, JokeTransport};
use sobserve::{
    CompositeHooks, MetricsObservabilityHooks, SafeRouterHooks, SafeToolHooks,
    TracingObservabilityHooks,
};
use sprovider::ModelProvider;
use sprovider::adapters::ollama::{
    OllamaProvider, list_ollama_models, model_is_available, ollama_host_from_base_url,
};
use srouter::IntentRouter;
use stooling::{DefaultToolExecutor, ToolError, ToolRegistry};

use crate::config::{ConfigError, SwitchboardConfig};
use crate::tools::{Clock, SystemClock, register_default_tools};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    Config,
    HttpClient,
    Tooling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::new(RuntimeErrorKind::Config, value.to_string())
    }
}

impl From<ToolError> for RuntimeError {
    fn from(value: ToolError) -> Self {
        Self::new(RuntimeErrorKind::Tooling, value.to_string())
    }
}

impl From<reqwest::Error> for RuntimeError {
    fn from(value: reqwest::Error) -> Self {
        Self::new(RuntimeErrorKind::HttpClient, value.to_string())
    }
}

/// Collaborators that tests replace with fakes.
#[derive(Clone)]
pub struct RuntimeParts {
    pub provider: Arc<dyn ModelProvider>,
    pub joke_transport: Arc<dyn JokeTransport>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Clone)]
pub struct SwitchboardRuntime {
    pub config: SwitchboardConfig,
    pub registry: Arc<ToolRegistry>,
    pub router: IntentRouter,
    /// Client used for the startup probe; shares the completion timeout.
    pub completion_client: Option<Client>,
}

/// Builds the live runtime: one `reqwest::Client` per concern, each with its own timeout.
pub fn build_runtime(config: SwitchboardConfig) -> Result<SwitchboardRuntime, RuntimeError> {
    config.validate()?;

    let completion_client = Client::builder()
        .timeout(config.completion_timeout)
        .build()?;
    let fetch_client = Client::builder().timeout(config.fetch_timeout).build()?;

    let transport =
        OllamaProvider::http_transport(completion_client.clone(), config.base_url.clone());
    let provider =
        OllamaProvider::new(Arc::new(transport)).with_fallback_model(config.model.clone());

    let parts = RuntimeParts {
        provider: Arc::new(provider),
        joke_transport: Arc::new(HttpJokeTransport::new(fetch_client)),
        clock: Arc::new(SystemClock),
    };

    let mut runtime = build_runtime_with(config, parts)?;
    runtime.completion_client = Some(completion_client);
    Ok(runtime)
}

pub fn build_runtime_with(
    config: SwitchboardConfig,
    parts: RuntimeParts,
) -> Result<SwitchboardRuntime, RuntimeError> {
    config.validate()?;

    let fetcher =
        JokeFetcher::new(parts.joke_transport).with_base_url(config.joke_base_url.clone());
    let mut registry = ToolRegistry::new();
    register_default_tools(
        &mut registry,
        parts.clock,
        fetcher,
        config.joke_filter.clone(),
    )?;
    let registry = Arc::new(registry);

    let executor = DefaultToolExecutor::new(Arc::clone(&registry))
        .with_hooks(Arc::new(SafeToolHooks::new(CompositeHooks::new(
            TracingObservabilityHooks,
            MetricsObservabilityHooks,
        ))))
        .with_timeout(config.tool_timeout);

    let router = IntentRouter::builder(parts.provider, Arc::new(executor))
        .policy(config.router_policy())
        .hooks(Arc::new(SafeRouterHooks::new(CompositeHooks::new(
            TracingObservabilityHooks,
            MetricsObservabilityHooks,
        ))))
        .build();

    Ok(SwitchboardRuntime {
        config,
        registry,
        router,
        completion_client: None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ready,
    ModelMissing { available: Vec<String> },
    Unreachable { message: String },
}

/// Checks that the local model runtime answers and has the configured model pulled.
/// Never fatal: the session still starts and reports errors per turn.
pub async fn probe_model_runtime(client: &Client, config: &SwitchboardConfig) -> ProbeOutcome {
    let host = ollama_host_from_base_url(&config.base_url);
    let outcome = match list_ollama_models(client, &host).await {
        Ok(available) if model_is_available(&available, &config.model) => ProbeOutcome::Ready,
        Ok(available) => ProbeOutcome::ModelMissing { available },
        Err(error) => ProbeOutcome::Unreachable {
            message: error.to_string(),
        },
    };

    match &outcome {
        ProbeOutcome::Ready => {
            tracing::info!(phase = "startup", event = "model_ready", host, model = config.model);
        }
        ProbeOutcome::ModelMissing { available } => tracing::warn!(
            phase = "startup",
            event = "model_missing",
            host,
            model = config.model,
            available = available.join(",")
        ),
        ProbeOutcome::Unreachable { message } => tracing::warn!(
            phase = "startup",
            event = "runtime_unreachable",
            host,
            error = message
        ),
    }

    outcome
}
