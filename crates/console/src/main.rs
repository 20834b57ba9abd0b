mod config;
mod shell;

use std::sync::Arc;

use catalog_client::{Gateway, SessionStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = config::AppConfig::from_env()?;

    // Logs go to stderr so they never interleave with the prompt.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(api_url = %config.api_url, "starting catalog console");

    let session = SessionStore::new();
    let gateway = Arc::new(Gateway::new(config.api_url.clone(), session.clone()));

    let mut shell = shell::Shell::new(gateway, session, config)?;
    shell.run().await
}
