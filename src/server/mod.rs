//! HTTP API over the search service.

pub mod error;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::MarketService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MarketService>,
}

/// Create the router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/search", get(handlers::search))
        .route("/smart-search", post(handlers::smart_search))
        .route("/multi-search", post(handlers::multi_search))
        .route("/style-collection", post(handlers::style_collection))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(service: Arc<MarketService>) -> std::io::Result<()> {
    let addr = service.config().bind_address.clone();
    let app = router(AppState { service });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting web server on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
