use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::card::{CardSettings, ProductCard};
use super::state::ViewState;
use crate::catalog::{CatalogPipeline, CatalogSource, filter};
use crate::config::AppConfig;
use crate::models::ResolvedCatalog;
use crate::storage::{ObjectStore, TokenUrlSigner};
use crate::utils::error::{Result, ViewError};

/// Snapshot of the controller for status endpoints and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub status: &'static str,
    pub message: Option<String>,
    pub query: String,
    pub products: Option<usize>,
    pub offers: Option<usize>,
    pub unavailable_images: Option<usize>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Owns the catalog lifecycle and the current search query.
pub struct CatalogView {
    source: Arc<dyn CatalogSource>,
    state: RwLock<ViewState>,
    query: RwLock<String>,
    settings: CardSettings,
}

impl CatalogView {
    pub fn new(source: Arc<dyn CatalogSource>, settings: CardSettings) -> Self {
        Self {
            source,
            state: RwLock::new(ViewState::Idle),
            query: RwLock::new(String::new()),
            settings,
        }
    }

    /// Wires the full load pipeline: `store` for the document, a token signer
    /// for image URLs.
    pub fn from_config(config: &AppConfig, store: Arc<dyn ObjectStore>) -> Result<Self> {
        let signer = Arc::new(TokenUrlSigner::from_config(&config.signing)?);
        let pipeline = CatalogPipeline::from_config(config, store, signer);
        Ok(Self::new(Arc::new(pipeline), CardSettings::from_config(config)))
    }

    /// Runs the one and only catalog load. Load failures end in the
    /// `Failed` state rather than an error; only a repeated call errors.
    pub async fn initialize(&self) -> std::result::Result<(), ViewError> {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, ViewState::Idle) {
                return Err(ViewError::AlreadyInitialized);
            }
            state.begin_loading()?;
        }
        info!("Catalog view: idle -> loading");

        let outcome = self.source.load().await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(catalog) => {
                let products = catalog.len();
                state.complete(catalog)?;
                info!(products, "Catalog view: loading -> ready");
            }
            Err(e) => {
                error!(error = %e, "Error fetching product data");
                state.fail()?;
                info!("Catalog view: loading -> failed");
            }
        }
        Ok(())
    }

    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> StatusReport {
        let state = self.state.read().await;
        let catalog = state.catalog();
        StatusReport {
            status: state.name(),
            message: state.error_message().map(str::to_string),
            query: self.query.read().await.clone(),
            products: catalog.map(|c| c.len()),
            offers: catalog.map(|c| c.offer_count()),
            unavailable_images: catalog.map(|c| c.unavailable_images()),
            resolved_at: catalog.map(|c| c.resolved_at()),
        }
    }

    /// Stores the query lower-cased. Never triggers a reload.
    pub async fn set_query(&self, query: &str) {
        *self.query.write().await = query.to_lowercase();
    }

    pub async fn query(&self) -> String {
        self.query.read().await.clone()
    }

    pub async fn catalog(&self) -> std::result::Result<Arc<ResolvedCatalog>, ViewError> {
        let state = self.state.read().await;
        state.catalog().cloned().ok_or_else(|| state.not_ready())
    }

    /// Cards for the products matching the stored query.
    pub async fn visible_products(&self) -> std::result::Result<Vec<ProductCard>, ViewError> {
        let query = self.query().await;
        self.search(&query).await
    }

    /// Cards for the products matching `query`, leaving the stored query alone.
    pub async fn search(&self, query: &str) -> std::result::Result<Vec<ProductCard>, ViewError> {
        let catalog = self.catalog().await?;
        let cards = filter(&catalog, &query.to_lowercase())
            .iter()
            .map(|product| ProductCard::build(product, &self.settings))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    pub fn settings(&self) -> &CardSettings {
        &self.settings
    }
}
