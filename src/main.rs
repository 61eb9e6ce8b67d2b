//! Skew Engine Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hypothesis_skew_engine::api::{create_router, AppState};
use hypothesis_skew_engine::config::EngineConfig;
use hypothesis_skew_engine::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hypothesis_skew_engine=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = EngineConfig::load();
    info!(
        floor = config.bands.floor,
        ceiling = config.bands.ceiling,
        dead_band = config.dead_band,
        "engine config loaded"
    );

    let metrics = Metrics::init(&config);

    let state = AppState::new(config);
    let router = create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("SKEW_ENGINE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "skew engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
