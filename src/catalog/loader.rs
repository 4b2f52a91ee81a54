use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::sanitize::sanitize;
use crate::config::StorageConfig;
use crate::models::{Offer, Price, Product};
use crate::storage::ObjectStore;
use crate::utils::error::LoadError;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<RawProduct>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    product_name: String,
    sites: Vec<RawOffer>,
}

#[derive(Debug, Deserialize)]
struct RawOffer {
    website: String,
    price: Price,
    url: String,
    image: String,
}

/// Fetches the catalog document and turns it into products whose images
/// still point at storage keys.
pub struct CatalogLoader {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key: String,
}

impl CatalogLoader {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn from_config(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        Self::new(store, &config.bucket, &config.catalog_key)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn load(&self) -> Result<Vec<Product>, LoadError> {
        info!(bucket = %self.bucket, key = %self.key, "Fetching catalog document");
        let raw = self
            .store
            .get_object(&self.bucket, &self.key)
            .await
            .map_err(LoadError::Unreachable)?;

        debug!(bytes = raw.len(), "Catalog document fetched");
        let products = parse_catalog(&raw)?;
        info!(products = products.len(), "Catalog parsed");
        Ok(products)
    }
}

/// Sanitizes and parses a raw catalog document.
pub fn parse_catalog(raw: &[u8]) -> Result<Vec<Product>, LoadError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| LoadError::malformed(format!("catalog is not valid UTF-8: {}", e)))?;

    let sanitized = sanitize(text);
    let document: CatalogDocument =
        serde_json::from_str(&sanitized).map_err(|e| LoadError::malformed(e.to_string()))?;

    let mut seen = HashSet::with_capacity(document.products.len());
    document
        .products
        .into_iter()
        .map(|raw| {
            if raw.sites.is_empty() {
                return Err(LoadError::malformed(format!(
                    "product {} has no offers",
                    raw.product_name
                )));
            }
            if !seen.insert(raw.product_name.clone()) {
                return Err(LoadError::malformed(format!(
                    "duplicate product {}",
                    raw.product_name
                )));
            }

            let sites = raw
                .sites
                .into_iter()
                .map(|o| Offer::new(o.website, o.price, o.url, o.image))
                .collect();
            Ok(Product::new(raw.product_name, sites))
        })
        .collect()
}
