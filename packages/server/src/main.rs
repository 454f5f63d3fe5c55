use anyhow::Context;
use tracing::info;

use blog_server::config::AppConfig;
use blog_server::logging::init_tracing;
use blog_server::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;
    init_tracing(&config.logging).context("Failed to initialize tracing")?;

    let server = Server::start(config).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    server.stop().await
}
