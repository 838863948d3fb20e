//! Transport seam for the joke source.

use reqwest::Client;
use scommon::BoxFuture;
use serde_json::Value;

use crate::FetchError;

pub type TransportFuture<'a, T> = BoxFuture<'a, T>;

pub trait JokeTransport: Send + Sync + std::fmt::Debug {
    /// Issues one GET and decodes the body as JSON.
    fn get_json<'a>(
        &'a self,
        url: &'a str,
        query: &'a [(String, String)],
    ) -> TransportFuture<'a, Result<Value, FetchError>>;
}

#[derive(Debug, Clone)]
pub struct HttpJokeTransport {
    client: Client,
}

impl HttpJokeTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl JokeTransport for HttpJokeTransport {
    fn get_json<'a>(
        &'a self,
        url: &'a str,
        query: &'a [(String, String)],
    ) -> TransportFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move {
            let response = self.client.get(url).query(query).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::remote_unavailable(format!(
                    "joke source responded with status {status}"
                )));
            }

            Ok(response.json::<Value>().await?)
        })
    }
}
