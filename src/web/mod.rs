use axum::{
    Router,
    http::header,
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::get,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{AppConfig, CatalogView};

pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod responses;

pub use handlers::{dashboard_page, get_product, list_products, view_status, SearchParams};
pub use responses::*;

#[derive(Clone)]
pub struct AppState {
    pub view: Arc<CatalogView>,
    pub config: AppConfig,
}

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="280" height="140" viewBox="0 0 280 140"><rect width="280" height="140" fill="#eeeeee"/><text x="140" y="75" font-family="Arial" font-size="14" fill="#9e9e9e" text-anchor="middle">Image unavailable</text></svg>"##;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // API routes
        .nest("/api/v1", api_routes())
        // Dashboard
        .route("/", get(dashboard_page))
        .route("/static/image-unavailable.svg", get(placeholder_image))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive())
                .layer(from_fn(middleware::request_logging))
                .layer(from_fn(middleware::security_headers)),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:name", get(get_product))
        .route("/status", get(view_status))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "price-catalog"
    }))
}

async fn placeholder_image() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], PLACEHOLDER_SVG)
}

pub async fn serve(config: AppConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.server.host, config.server.port)).await?;

    tracing::info!("Server starting on {}:{}", config.server.host, config.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
