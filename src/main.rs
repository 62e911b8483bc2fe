use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use pollweb::{
    backend::BackendClient, cache::ResultsCache, config::Cli, http::build_router,
    metrics::CastVoteCounter, queue::VoteQueue, refresher::spawn_refresher,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config;

    let queue = Arc::new(VoteQueue::new(config.queue_capacity as usize));
    let cache = Arc::new(ResultsCache::new());
    let votes_cast = Arc::new(CastVoteCounter::new());

    let client = BackendClient::new(
        config.backend_base_url.clone(),
        Duration::from_secs(config.backend_timeout_secs),
    )?;
    let _refresher = spawn_refresher(
        Duration::from_secs(config.refresh_interval_secs),
        client,
        cache.clone(),
    );

    // `queue` is also the pull boundary for the external vote publisher;
    // this binary only exposes it, the durable transport lives elsewhere.
    let app = build_router(config.clone(), queue, cache, votes_cast)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!(
        bind = %config.bind,
        backend = %config.backend_base_url,
        "starting pollweb"
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).compact().init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
