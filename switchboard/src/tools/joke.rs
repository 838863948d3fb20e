//! Joke tool backed by the external joke source.

use sfetch::{JokeFetcher, JokeFilter};
use stooling::{
    ToolArguments, ToolDescriptor, ToolError, ToolExecutionContext, ToolFuture, Tool, ToolValue,
};

pub const JOKE_APOLOGY: &str = "Sorry, I couldn't fetch a joke right now. Please try again later.";

#[derive(Debug, Clone)]
pub struct JokeTool {
    fetcher: JokeFetcher,
    filter: JokeFilter,
}

impl JokeTool {
    pub fn new(fetcher: JokeFetcher, filter: JokeFilter) -> Self {
        Self { fetcher, filter }
    }
}

impl Tool for JokeTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new("GetJoke", "Fetches a random programming joke")
    }

    /// Never fails: fetch errors are logged and replaced with an apology.
    fn invoke<'a>(
        &'a self,
        _args: ToolArguments,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolValue, ToolError>> {
        Box::pin(async move {
            match self.fetcher.fetch_joke(&self.filter).await {
                Ok(joke) => Ok(ToolValue::Text(joke)),
                Err(error) => {
                    tracing::warn!(
                        phase = "tool",
                        event = "joke_fetch_failed",
                        error_kind = ?error.kind,
                        error = %error
                    );
                    Ok(ToolValue::text(JOKE_APOLOGY))
                }
            }
        })
    }
}
