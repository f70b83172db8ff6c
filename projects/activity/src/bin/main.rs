use std::time::Duration;

use anyhow::Result;
use axum::{extract::Extension, routing::get, serve, Router};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::info;
use utils_trace::tracing_init;

use projects_activity::config::AppConfig;
use projects_activity::endpoints::auth::index::handler as auth_handler;
use projects_activity::endpoints::commit_activity::index::handler as commit_activity_handler;

/// Outbound calls to GitHub are bounded so a slow upstream cannot hold a
/// request open indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("ConfigLoad: {source}")]
    ConfigLoad {
        #[source]
        source: projects_activity::config::ConfigError,
    },
    #[error("HttpClientBuild: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
    #[error("TcpListenerBind: {source}")]
    TcpListenerBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Serve: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    dotenvy::dotenv().ok();

    tracing_init("info").map_err(|source| MainError::TracingInit { source })?;

    let config = AppConfig::from_env().map_err(|source| MainError::ConfigLoad { source })?;

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| MainError::HttpClientBuild { source })?;

    // Set up the router; CORS stays permissive for the SPA frontend
    let app = Router::new()
        .route("/auth", get(auth_handler))
        .route("/commit_activity", get(commit_activity_handler))
        .layer(Extension(config.clone()))
        .layer(Extension(client))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Server running on addr: {}", config.addr);

    serve(listener, app)
        .await
        .map_err(|source| MainError::Serve { source })?;

    Ok(())
}
