//! Standalone dashboard server.
//!
//! Configuration comes from `MOVIEMIND_*` environment variables (and `.env`).

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dashboard::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting MovieMind dashboard with {:?}", config);

    dashboard::run(config).await
}
