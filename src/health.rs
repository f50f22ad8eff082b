//! Health check endpoint for uptime monitors
//!
//! Answers `GET /` and `GET /health` with a fixed plain-text body; every other
//! path is a 404. Runs alongside the gateway and shares no state with it.

use axum::{Router, http::StatusCode, routing::get};
use tracing::{error, info, warn};

const HEALTH_BODY: &str = "Bot is running!";

/// Build the health check router
pub fn router() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .fallback(not_found)
}

pub async fn health() -> &'static str {
    HEALTH_BODY
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Start the health check server in the background
///
/// # Arguments
/// * `port` - Port to listen on, bound on all interfaces
///
/// Bind failures are logged and the bot keeps running without the endpoint.
pub async fn spawn(port: u16) {
    let address = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            warn!("Health check server could not bind {}: {}", address, e);
            return;
        }
    };

    info!("Health check server started on port {}", port);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router()).await {
            error!("Health check server terminated: {}", e);
        }
    });
}
