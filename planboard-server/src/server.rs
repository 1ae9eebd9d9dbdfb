//! Server lifecycle

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;
use tracing::info;

/// Serve the API until Ctrl-C
///
/// Logging must already be initialized; see [`crate::tracing::init_logging`].
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting Planboard HTTP Server v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Prometheus metrics
    crate::metrics::init_prometheus()?;
    crate::metrics::init_metrics();

    let state = AppState::placeholder();
    let app = routes::create_router(state, config.upload_limit_bytes);

    info!("Listening on {}", config.bind_address);
    routes::print_routes();

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if config.otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        crate::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, shutting down gracefully...");
}
