use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::{ImageRef, Product, ResolvedCatalog};
use crate::storage::{SignedUrl, UrlSigner};
use crate::utils::error::ResolutionError;

/// Position of one offer's image inside the product list.
#[derive(Debug, Clone)]
struct ImageSlot {
    product: usize,
    offer: usize,
    key: String,
}

/// Swaps every offer's storage key for a signed access URL.
///
/// All signing requests run concurrently and are joined before the catalog
/// is published. A failed request only degrades its own offer's image.
pub struct ResourceResolver {
    signer: Arc<dyn UrlSigner>,
    bucket: String,
    ttl: Duration,
    max_concurrent: usize,
}

impl ResourceResolver {
    pub fn new(signer: Arc<dyn UrlSigner>, bucket: impl Into<String>, ttl: Duration) -> Self {
        Self {
            signer,
            bucket: bucket.into(),
            ttl,
            max_concurrent: 0,
        }
    }

    /// Caps in-flight signing requests; `0` leaves them unbounded.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub async fn resolve(&self, mut products: Vec<Product>) -> ResolvedCatalog {
        let slots: Vec<ImageSlot> = products
            .iter()
            .enumerate()
            .flat_map(|(p, product)| {
                product.sites.iter().enumerate().filter_map(move |(o, offer)| {
                    offer.image.storage_key().map(|key| ImageSlot {
                        product: p,
                        offer: o,
                        key: key.to_string(),
                    })
                })
            })
            .collect();

        debug!(requests = slots.len(), "Resolving offer images");

        // Collected eagerly: a lazy map over `self` is not Send across `buffered`.
        let requests: Vec<_> = slots.iter().map(|slot| self.sign(&slot.key)).collect();
        // Both joins yield results in request order, so slot i gets outcome i.
        let outcomes: Vec<Result<SignedUrl, ResolutionError>> = if self.max_concurrent == 0 {
            join_all(requests).await
        } else {
            stream::iter(requests)
                .buffered(self.max_concurrent)
                .collect()
                .await
        };

        for (slot, outcome) in slots.iter().zip(outcomes) {
            let product = &mut products[slot.product];
            let offer = &mut product.sites[slot.offer];

            offer.image = match outcome {
                Ok(signed) => {
                    metrics::counter!("catalog_images_resolved_total").increment(1);
                    ImageRef::Signed {
                        url: signed.url,
                        expires_at: signed.expires_at,
                    }
                }
                Err(e) => {
                    metrics::counter!("catalog_images_failed_total").increment(1);
                    warn!(
                        product = %product.name,
                        website = %offer.website,
                        key = %slot.key,
                        error = %e,
                        "Image resolution failed, using placeholder"
                    );
                    ImageRef::Unavailable
                }
            };
        }

        ResolvedCatalog::new(products)
    }

    async fn sign(&self, key: &str) -> Result<SignedUrl, ResolutionError> {
        if key.trim().is_empty() {
            return Err(ResolutionError::EmptyKey);
        }
        self.signer.sign(&self.bucket, key, self.ttl).await
    }
}
