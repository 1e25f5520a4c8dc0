use anyhow::Result;
use chef_core::ChefConfig;
use chef_server::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Picks up `.env` first; missing credentials abort here, before anything listens.
    let config = ChefConfig::load()?;

    init_logging(&config.logging.level, &config.logging.format);
    tracing::info!("ChefAI server v{}", env!("CARGO_PKG_VERSION"));

    chef_server::start_server(&config).await
}
