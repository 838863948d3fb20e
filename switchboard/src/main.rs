use std::time::Duration;

use clap::Parser;
use switchboard::sprovider::DEFAULT_MODEL;
use switchboard::sprovider::adapters::ollama::OLLAMA_BASE_URL;
use switchboard::{
    ProbeOutcome, SessionLoop, SwitchboardConfig, build_runtime, probe_model_runtime,
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    /// OpenAI-compatible endpoint of the local model runtime
    #[arg(long, env = "SWITCHBOARD_BASE_URL", default_value = OLLAMA_BASE_URL)]
    base_url: String,

    /// Model used for both tool selection and reply composition
    #[arg(long, env = "SWITCHBOARD_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Seconds to wait for each completion request
    #[arg(long, default_value_t = 120)]
    completion_timeout_secs: u64,

    /// Seconds to wait for the joke source
    #[arg(long, default_value_t = 10)]
    fetch_timeout_secs: u64,

    /// Maximum tokens generated per completion
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Skip the startup check against the model runtime
    #[arg(long)]
    skip_probe: bool,
}

impl Cli {
    fn config(&self) -> SwitchboardConfig {
        SwitchboardConfig::default()
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone())
            .with_completion_timeout(Duration::from_secs(self.completion_timeout_secs))
            .with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .with_max_tokens(self.max_tokens)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Console output goes to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let runtime = build_runtime(cli.config())?;

    if !cli.skip_probe
        && let Some(client) = &runtime.completion_client
    {
        match probe_model_runtime(client, &runtime.config).await {
            ProbeOutcome::Ready => {}
            ProbeOutcome::ModelMissing { .. } => eprintln!(
                "warning: model '{}' is not available at {}. Try `ollama pull {}`.",
                runtime.config.model, runtime.config.base_url, runtime.config.model
            ),
            ProbeOutcome::Unreachable { message } => eprintln!(
                "warning: could not reach the model runtime at {} ({message}).",
                runtime.config.base_url
            ),
        }
    }

    let greeting = format!(
        "Connected to '{}' at {} with {} tools. Type 'exit' or an empty line to quit.",
        runtime.config.model,
        runtime.config.base_url,
        runtime.registry.len()
    );

    let mut session = SessionLoop::new(
        runtime.router.clone(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .with_greeting(greeting);

    let turns = session.run().await?;
    tracing::info!(phase = "session", event = "terminated", turns = turns as u64);

    Ok(())
}
