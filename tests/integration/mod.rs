// Integration tests for price-catalog
// These tests drive the loader, resolver, view controller and HTTP layer together

pub mod api_tests;
pub mod pipeline_tests;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request},
};
use chrono::Utc;
use price_catalog::{
    AppConfig, CatalogView, MemoryObjectStore, ObjectStore, SignedUrl, UrlSigner,
    config::{DisplayConfig, LoggingConfig, ResolverConfig, ServerConfig, SigningConfig, StorageConfig},
    utils::error::ResolutionError,
    web::AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "product-data";
pub const TEST_SECRET: &str = "integration-secret-key-32-characters";

/// The sample document: a three-way comparison with a tie, an all-unavailable
/// product and a product named for the substring search case.
pub const SAMPLE_CATALOG: &str = r#"{
  "products": [
    {"product_name": "iphone-16", "sites": [
      {"website": "A", "price": 80000, "url": "https://a.in/iphone-16", "image": "iphone-16/a.jpg"},
      {"website": "B", "price": 75000, "url": "https://b.in/iphone-16", "image": "iphone-16/b.jpg"},
      {"website": "C", "price": 75000, "url": "https://c.in/iphone-16", "image": "iphone-16/c.jpg"}
    ]},
    {"product_name": "galaxy-buds-3", "sites": [
      {"website": "A", "price": Infinity, "url": "https://a.in/buds", "image": "buds/a.jpg"},
      {"website": "B", "price": Infinity, "url": "https://b.in/buds", "image": "buds/b.jpg"},
      {"website": "C", "price": Infinity, "url": "https://c.in/buds", "image": "buds/c.jpg"}
    ]},
    {"product_name": "Smart-Phone-X", "sites": [
      {"website": "A", "price": 19999, "url": "https://a.in/spx", "image": "spx/a.jpg"},
      {"website": "D", "price": Infinity, "url": "https://d.in/spx", "image": "spx/d.jpg"}
    ]}
  ]
}"#;

/// Test configuration for integration tests
pub fn get_test_config(endpoint: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        storage: StorageConfig {
            endpoint: endpoint.to_string(),
            bucket: TEST_BUCKET.to_string(),
            catalog_key: "product_data.json".to_string(),
            request_timeout: 5,
        },
        signing: SigningConfig {
            public_base_url: "https://cdn.example.com".to_string(),
            secret_key: TEST_SECRET.to_string(),
            ttl_seconds: 3600,
        },
        resolver: ResolverConfig::default(),
        display: DisplayConfig::default(),
        logging: LoggingConfig::default(),
    }
}

pub fn sample_store() -> MemoryObjectStore {
    MemoryObjectStore::new().with_object(TEST_BUCKET, "product_data.json", SAMPLE_CATALOG)
}

/// View wired to `store` with the default token signer.
pub fn create_test_view(store: impl ObjectStore + 'static) -> anyhow::Result<Arc<CatalogView>> {
    let config = get_test_config("http://localhost:9000");
    Ok(Arc::new(CatalogView::from_config(&config, Arc::new(store))?))
}

pub async fn create_test_app_state(store: impl ObjectStore + 'static, initialize: bool) -> anyhow::Result<AppState> {
    let view = create_test_view(store)?;
    if initialize {
        view.initialize().await?;
    }
    Ok(AppState {
        view,
        config: get_test_config("http://localhost:9000"),
    })
}

/// Signer that refuses every key containing `poison`.
pub struct FlakySigner {
    pub poison: &'static str,
}

#[async_trait]
impl UrlSigner for FlakySigner {
    async fn sign(&self, bucket: &str, key: &str, ttl: Duration) -> Result<SignedUrl, ResolutionError> {
        if key.contains(self.poison) {
            return Err(ResolutionError::Unavailable(format!("refused {}", key)));
        }
        Ok(SignedUrl {
            url: format!("https://signed.example.com/{}/{}", bucket, key),
            expires_at: Utc::now() + chrono::Duration::seconds(ttl.as_secs() as i64),
        })
    }
}

/// Helper to make HTTP requests to the test app
pub async fn make_request(app: &Router, method: Method, uri: &str) -> anyhow::Result<axum::response::Response> {
    let request = Request::builder().method(method).uri(uri).body(Body::empty())?;
    let response = app.clone().oneshot(request).await?;
    Ok(response)
}

pub async fn read_json(response: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn read_text(response: axum::response::Response) -> anyhow::Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Helper to wait for async operations
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_seconds: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_secs(timeout_seconds);

    while start.elapsed() < timeout {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    false
}
