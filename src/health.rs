//! HTTP health probe for the hosting platform.

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const HEALTH_PATH: &str = "/healthz";
pub const HEALTHY_BODY: &str = "Bot is healthy!";

/// Router answering the health path; every other path is a 404
pub fn router() -> Router {
    Router::new().route(HEALTH_PATH, get(healthz))
}

async fn healthz() -> &'static str {
    debug!("Health probe");
    HEALTHY_BODY
}

/// Serve the health router on its own listener
pub async fn serve(address: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!(%address, "Health probe listening");
    axum::serve(listener, router()).await
}
