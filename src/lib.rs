pub mod catalog;
pub mod config;
pub mod models;
pub mod storage;
pub mod utils;
pub mod view;
pub mod web;

// Re-export commonly used types
pub use catalog::{CatalogLoader, CatalogPipeline, CatalogSource, Comparison, ResourceResolver, compare, filter, sanitize};
pub use config::AppConfig;
pub use models::{ImageRef, Offer, Price, Product, ResolvedCatalog};
pub use storage::{HttpObjectStore, MemoryObjectStore, ObjectStore, SignedUrl, TokenUrlSigner, UrlSigner};
pub use utils::error::AppError;
pub use view::{CatalogView, ProductCard, ViewState};

pub type Result<T> = std::result::Result<T, AppError>;
