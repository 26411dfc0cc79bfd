use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use extractor::config::Config;
use extractor::routes::build_router;
use extractor::state::AppState;
use extractor::telemetry::init_tracing;
use extractor::workflow::{Collaborators, Workflow};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    init_tracing(&config.rust_log);

    info!("Starting extractor API v{}", env!("CARGO_PKG_VERSION"));

    // OCR, extraction and judge clients are shared by every run
    let collaborators = Collaborators::from_config(&config)?;
    let state = AppState {
        workflow: Arc::new(Workflow::new(collaborators)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
