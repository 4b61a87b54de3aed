use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bookshelf_api::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bookshelf_api=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    info!("Starting bookshelf API v{}", env!("CARGO_PKG_VERSION"));

    let (_, server) = start_server(&config)
        .await
        .with_context(|| format!("failed to bind {}", config.address()))?;

    server.await.context("server terminated unexpectedly")?;

    Ok(())
}
