use crate::message::Message;
use axum::{Router, http::HeaderValue, routing::get};
use log::error;
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::cors::CorsLayer;

mod health;
mod stats;

pub fn router(coordinator_tx: mpsc::Sender<Message>, frontend_url: Option<HeaderValue>) -> Router {
    let app = Router::new()
        .route("/stats", get(stats::stats))
        .with_state(coordinator_tx)
        .route("/health", get(health::health));

    match frontend_url {
        Some(frontend_url) => app.layer(CorsLayer::new().allow_origin(frontend_url)),
        None => app,
    }
}

/// Serves the stats endpoints until the listener fails
pub async fn listen(
    listener: TcpListener,
    coordinator_tx: mpsc::Sender<Message>,
    frontend_url: Option<HeaderValue>,
) {
    if let Err(error) = axum::serve(listener, router(coordinator_tx, frontend_url)).await {
        error!("HTTP server stopped: {error}");
    }
}
