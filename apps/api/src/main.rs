mod config;
mod errors;
mod generation;
mod providers;
mod routes;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::settings::store::RedisStore;
use crate::settings::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pitchdraft API v{}", env!("CARGO_PKG_VERSION"));

    // Configuration store (redis)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let settings = SettingsStore::new(Arc::new(RedisStore::new(redis)));
    info!("Settings store initialized");

    // Shared outbound HTTP client for provider calls and key validation
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;
    info!("HTTP client initialized");

    // Build app state
    let state = AppState { settings, http };

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
