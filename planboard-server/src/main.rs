//! Planboard HTTP Server binary

use planboard_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    planboard_server::tracing::init_logging(&config)?;

    planboard_server::server::run(config).await
}
