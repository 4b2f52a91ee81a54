use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Product;

/// Products of one load cycle with every image reference resolved or
/// marked unavailable. Order matches the source document.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCatalog {
    products: Vec<Product>,
    resolved_at: DateTime<Utc>,
    unavailable_images: usize,
}

impl ResolvedCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        let unavailable_images = products
            .iter()
            .flat_map(|p| p.sites.iter())
            .filter(|o| !o.image.is_signed())
            .count();

        Self {
            products,
            resolved_at: Utc::now(),
            unavailable_images,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn offer_count(&self) -> usize {
        self.products.iter().map(|p| p.sites.len()).sum()
    }

    pub fn unavailable_images(&self) -> usize {
        self.unavailable_images
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }
}
