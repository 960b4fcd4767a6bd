use clap::Parser;
use jiff::SignedDuration;
use nanolink_core::{AliasStore, RandomGenerator, Reaper};
use nanolink_gateway::cli::Cli;
use nanolink_gateway::{App, AppState};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Cli::try_parse()?;

    let store = Arc::new(AliasStore::with_default_ttl(
        RandomGenerator::new(),
        SignedDuration::from_secs(i64::from(config.default_ttl_seconds)),
    ));

    let reaper = Reaper::new(
        Arc::clone(&store),
        Duration::from_secs(u64::from(config.sweep_interval_seconds)),
    )
    .spawn();

    let app = App::router(AppState::new(store, config.base_url.clone()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        base_url = %config.base_url,
        default_ttl_seconds = config.default_ttl_seconds,
        sweep_interval_seconds = config.sweep_interval_seconds,
        "starting gateway server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
    }
}
