//! drainPrism relay binary.
//!
//! HTTP intake -> bounded channel -> single dispatcher -> DogStatsD over UDP.
//! Ctrl-C stops the intake; the dispatcher drains what is queued and exits.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use drainprism_core::error::{DrainError, Result};
use drainprism_relay::{
    app_state::AppState, backend::StatsdBackend, client::Client, config, dispatch::Dispatcher,
    obs::RelayMetrics, router,
};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "drainprism-relay failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.ingest.socket_addr()?;

    let backend = StatsdBackend::connect(cfg.statsd.socket_addr()?).await?;
    let metrics = Arc::new(RelayMetrics::default());
    let client = Client::new(Arc::new(backend), cfg.excluded_tags.clone(), metrics);

    let (tx, rx) = mpsc::channel(cfg.ingest.channel_capacity);
    let dispatcher = tokio::spawn(Dispatcher::new(client.clone()).run(rx));

    let state = AppState::new(tx, client, cfg.ingest.max_batch);
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "drainprism-relay starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| DrainError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DrainError::Internal(format!("server failed: {e}")))?;

    // The router (and with it the last sender) is gone; wait for the drain.
    dispatcher
        .await
        .map_err(|e| DrainError::Internal(format!("dispatcher task failed: {e}")))?;
    tracing::info!("drainprism-relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
