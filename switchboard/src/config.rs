//! Process configuration and validation.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use switchboard::SwitchboardConfig;
//!
//! let config = SwitchboardConfig::default()
//!     .with_model("qwen2.5")
//!     .with_completion_timeout(Duration::from_secs(60));
//!
//! assert!(config.validate().is_ok());
//! assert!(SwitchboardConfig::default().with_model(" ").validate().is_err());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use reqwest::Url;
use sfetch::{JOKE_API_BASE_URL, JokeFilter};
use sprovider::DEFAULT_MODEL;
use sprovider::adapters::ollama::OLLAMA_BASE_URL;
use srouter::{DEFAULT_SYSTEM_PROMPT, RouterPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    InvalidEndpoint,
    EmptyModel,
    ZeroTimeout,
    TemperatureOutOfRange,
    ZeroMaxTokens,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidEndpoint, message)
    }

    pub fn empty_model(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::EmptyModel, message)
    }

    pub fn zero_timeout(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::ZeroTimeout, message)
    }

    pub fn temperature_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::TemperatureOutOfRange, message)
    }

    pub fn zero_max_tokens(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::ZeroMaxTokens, message)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchboardConfig {
    pub base_url: String,
    pub model: String,
    pub completion_timeout: Duration,
    pub fetch_timeout: Duration,
    pub tool_timeout: Duration,
    pub routing_temperature: f32,
    pub composition_temperature: f32,
    pub system_prompt: String,
    /// Cap on generated tokens per completion. `None` leaves it to the runtime.
    pub max_tokens: Option<u32>,
    pub joke_base_url: String,
    pub joke_filter: JokeFilter,
}

impl Default for SwitchboardConfig {
    fn default() -> Self {
        Self {
            base_url: OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            completion_timeout: Duration::from_secs(120),
            fetch_timeout: Duration::from_secs(10),
            tool_timeout: Duration::from_secs(30),
            routing_temperature: 0.0,
            composition_temperature: 0.0,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: None,
            joke_base_url: JOKE_API_BASE_URL.to_string(),
            joke_filter: JokeFilter::safe(),
        }
    }
}

impl SwitchboardConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_routing_temperature(mut self, temperature: f32) -> Self {
        self.routing_temperature = temperature;
        self
    }

    pub fn with_composition_temperature(mut self, temperature: f32) -> Self {
        self.composition_temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_joke_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.joke_base_url = base_url.into();
        self
    }

    pub fn with_joke_filter(mut self, filter: JokeFilter) -> Self {
        self.joke_filter = filter;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("base_url", &self.base_url)?;
        validate_http_url("joke_base_url", &self.joke_base_url)?;

        if self.model.trim().is_empty() {
            return Err(ConfigError::empty_model("model must not be empty"));
        }

        for (name, timeout) in [
            ("completion_timeout", self.completion_timeout),
            ("fetch_timeout", self.fetch_timeout),
            ("tool_timeout", self.tool_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::zero_timeout(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        for (name, temperature) in [
            ("routing_temperature", self.routing_temperature),
            ("composition_temperature", self.composition_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::temperature_out_of_range(format!(
                    "{name} must be in the inclusive range 0.0..=2.0, got {temperature}"
                )));
            }
        }

        if self.max_tokens == Some(0) {
            return Err(ConfigError::zero_max_tokens(
                "max_tokens must be greater than zero when set",
            ));
        }

        Ok(())
    }

    pub fn router_policy(&self) -> RouterPolicy {
        let policy = RouterPolicy::new(self.model.clone())
            .with_system_prompt(self.system_prompt.clone())
            .with_routing_temperature(self.routing_temperature)
            .with_composition_temperature(self.composition_temperature);

        match self.max_tokens {
            Some(max_tokens) => policy.with_max_tokens(max_tokens),
            None => policy,
        }
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|err| {
        ConfigError::invalid_endpoint(format!("{name} '{value}' is invalid: {err}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::invalid_endpoint(format!(
            "{name} '{value}' must use http or https, not {scheme}"
        ))),
    }
}
