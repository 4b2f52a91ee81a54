use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use super::pages::{DashboardContent, DashboardTemplate};
use super::{ApiResponse, AppError, AppState};
use crate::utils::error::ViewError;
use crate::view::{ProductCard, StatusReport};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    /// Search text lower-cased, empty when absent.
    fn query(&self) -> String {
        self.search.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// GET /api/v1/products?search=
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<ProductCard>>>, AppError> {
    let query = params.query();
    tracing::debug!(query = %query, "Listing products");

    let cards = state.view.search(&query).await?;
    let meta = serde_json::json!({
        "count": cards.len(),
        "query": query,
    });
    Ok(Json(ApiResponse::success_with_meta(cards, meta)))
}

/// GET /api/v1/products/:name
pub async fn get_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ProductCard>>, AppError> {
    let catalog = state.view.catalog().await?;
    let product = catalog
        .get(&name)
        .ok_or_else(|| AppError::not_found(format!("Product {}", name)))?;

    let card = ProductCard::build(product, state.view.settings()).map_err(ViewError::from)?;
    Ok(Json(ApiResponse::success(card)))
}

/// GET /api/v1/status
pub async fn view_status(State(state): State<AppState>) -> Json<ApiResponse<StatusReport>> {
    Json(ApiResponse::success(state.view.status().await))
}

/// GET / - server-rendered dashboard
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<DashboardTemplate, AppError> {
    let query = params.query();

    let content = match state.view.search(&query).await {
        Ok(cards) => DashboardContent::Products(cards),
        Err(ViewError::NotReady {
            message: Some(message),
            ..
        }) => DashboardContent::Failed(message),
        Err(ViewError::NotReady { .. }) => DashboardContent::Loading,
        Err(e) => return Err(e.into()),
    };
    Ok(DashboardTemplate::new(query, content))
}
