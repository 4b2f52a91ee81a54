use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::{CatalogLoader, ResourceResolver};
use crate::config::AppConfig;
use crate::models::ResolvedCatalog;
use crate::storage::{ObjectStore, UrlSigner};
use crate::utils::error::LoadError;

/// Anything able to produce one resolved catalog per call.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<ResolvedCatalog, LoadError>;
}

/// Loader followed by resolver.
pub struct CatalogPipeline {
    loader: CatalogLoader,
    resolver: ResourceResolver,
}

impl CatalogPipeline {
    pub fn new(loader: CatalogLoader, resolver: ResourceResolver) -> Self {
        Self { loader, resolver }
    }

    pub fn from_config(config: &AppConfig, store: Arc<dyn ObjectStore>, signer: Arc<dyn UrlSigner>) -> Self {
        let loader = CatalogLoader::from_config(store, &config.storage);
        let resolver = ResourceResolver::new(signer, &config.storage.bucket, config.signing.ttl())
            .with_max_concurrent(config.resolver.max_concurrent_requests);
        Self::new(loader, resolver)
    }
}

#[async_trait]
impl CatalogSource for CatalogPipeline {
    async fn load(&self) -> Result<ResolvedCatalog, LoadError> {
        let started = Instant::now();
        let products = self.loader.load().await?;
        let catalog = self.resolver.resolve(products).await;

        info!(
            bucket = %self.loader.bucket(),
            products = catalog.len(),
            offers = catalog.offer_count(),
            unavailable_images = catalog.unavailable_images(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog resolved"
        );
        Ok(catalog)
    }
}
