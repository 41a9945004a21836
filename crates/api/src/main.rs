//! RuchiServ ingress API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ruchi_api::routes::create_router;
use ruchi_api::state::AppState;
use ruchi_common::config::AppConfig;
use ruchi_common::queue::{self, OrderQueue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ruchi_api=debug,tower_http=debug")),
        )
        .init();

    tracing::info!("Starting RuchiServ ingress API...");

    // Load configuration (QUEUE_STREAM absence is startup-fatal)
    let config = AppConfig::from_env()?;

    // Connect to the queue transport
    let redis = queue::connect(&config.redis_url).await?;
    let order_queue = OrderQueue::new(redis, config.queue_stream.clone());

    // Build application state
    let state = AppState::new(order_queue, config.clone());

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    tracing::info!("Ingress API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
