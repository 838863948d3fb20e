//! Joke fetcher over an injected transport.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{FetchError, JokeFilter, JokeTransport};

pub const JOKE_API_BASE_URL: &str = "https://v2.jokeapi.dev";

#[derive(Debug, Clone)]
pub struct JokeFetcher {
    transport: Arc<dyn JokeTransport>,
    base_url: String,
}

impl JokeFetcher {
    pub fn new(transport: Arc<dyn JokeTransport>) -> Self {
        Self {
            transport,
            base_url: JOKE_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_joke(&self, filter: &JokeFilter) -> Result<String, FetchError> {
        let url = format!(
            "{}/joke/{}",
            self.base_url.trim_end_matches('/'),
            filter.category()
        );
        let query = filter.query_pairs();
        debug!(url = %url, category = filter.category(), "fetching joke");

        let body = self.transport.get_json(&url, &query).await.inspect_err(|err| {
            warn!(url = %url, error = %err, "joke source unavailable");
        })?;

        extract_joke(body)
    }
}

fn extract_joke(body: Value) -> Result<String, FetchError> {
    let Value::Object(mut object) = body else {
        return Err(FetchError::remote_format("joke response is not a JSON object"));
    };

    match object.remove("joke") {
        Some(Value::String(joke)) => Ok(joke),
        Some(_) => Err(FetchError::remote_format("joke field is not a string")),
        None => Err(FetchError::remote_format("joke response has no joke field")),
    }
}
