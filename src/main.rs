use std::sync::Arc;

use studio_gen::{ClientConfig, GenerationController, HttpTransport, TracingNotifier, EXAMPLE_PROMPTS};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = ClientConfig::from_env();
    tracing::info!(backend = %config.backend_url, "Using generation backend");

    let transport = HttpTransport::new(&config)?;
    let controller = GenerationController::new(Arc::new(transport), Arc::new(TracingNotifier));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = if args.is_empty() { EXAMPLE_PROMPTS[0].to_string() } else { args.join(" ") };

    controller.generate(&prompt, None).await;

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}
