mod config;
mod db;
mod errors;
mod extraction;
mod matching;
mod model_client;
mod models;
mod routes;
mod sentiment;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::model_client::{HttpModelProvider, KeywordOnlyProvider, ModelProvider};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireLens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the model provider. The HTTP provider probes its endpoint
    // once on first use; without an endpoint every caller takes the keyword
    // fallback paths.
    let model: Arc<dyn ModelProvider> = match &config.inference_endpoint {
        Some(endpoint) => {
            info!("Model provider: inference endpoint at {endpoint}");
            Arc::new(HttpModelProvider::new(endpoint.clone()))
        }
        None => {
            info!("Model provider: none configured, keyword fallbacks only");
            Arc::new(KeywordOnlyProvider)
        }
    };

    // Build app state
    let state = AppState {
        db,
        model,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
