pub mod catalog;
pub mod offer;
pub mod price;
pub mod product;

// Re-exports for convenience
pub use catalog::*;
pub use offer::*;
pub use price::*;
pub use product::*;
