pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::Config;
pub use state::AppState;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    init_tracing(&config);

    let state = Arc::new(AppState::new(config.clone()).await?);
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Shutterlog v{} listening on http://{addr}", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => tracing::error!("Error listening for shutdown: {e}"),
    }
}
