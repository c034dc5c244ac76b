// src/cli/serve.rs
// HTTP server initialization and main loop

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::app;
use crate::config::YouYoungConfig;
use crate::state::create_app_state;
use crate::store::{connect, run_migrations};

pub async fn run_server(config: &YouYoungConfig) -> Result<()> {
    info!("Starting YouYoung backend ({})", config.environment);
    info!("Responder: {}", config.responder);

    let pool = connect(&config.database_url, config.sqlite_max_connections).await?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    info!("Database ready at {}", config.database_url);

    if config.is_production() && config.cors_origin.trim() == "*" {
        warn!("CORS allows any origin in production");
    }

    let app_state = create_app_state(pool.clone(), config)?;
    let router = app(app_state);

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
