pub mod comparator;
pub mod loader;
pub mod pipeline;
pub mod resolver;
pub mod sanitize;
pub mod search;

pub use comparator::{Comparison, compare};
pub use loader::{CatalogLoader, parse_catalog};
pub use pipeline::{CatalogPipeline, CatalogSource};
pub use resolver::ResourceResolver;
pub use sanitize::sanitize;
pub use search::{FilteredView, filter};
