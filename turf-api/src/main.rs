use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turf_api::{app, AppState};
use turf_store::{seed, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turf_api=debug,turf_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    tracing::info!("Starting Turf API on port {}", config.server.port);

    let sweep_interval = config.business_rules.sweep_interval_seconds;
    let store = Arc::new(seed::demo_store(config.business_rules));

    tokio::spawn(turf_api::worker::start_expiry_sweeper(
        Arc::clone(&store),
        sweep_interval,
    ));

    let app = app(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
