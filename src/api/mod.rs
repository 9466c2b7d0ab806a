use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::post,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::provider::SearchProvider;

pub mod error;
pub mod handlers;
pub mod models;

pub use error::GatewayError;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SearchProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

pub fn create_router(state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = HeaderValue::from_str(allowed_origin.trim_end_matches('/'))
        .with_context(|| format!("Invalid CORS origin: {allowed_origin:?}"))?;

    // Only the configured frontend may call us from a browser
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/", post(handlers::search_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Bind the configured address and serve the gateway until ctrl-c.
pub async fn serve(config: &Config, provider: Arc<dyn SearchProvider>) -> Result<()> {
    let router = create_router(AppState::new(provider), &config.frontend_uri)?;
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    tracing::info!("Server is running on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        // never resolve, keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
