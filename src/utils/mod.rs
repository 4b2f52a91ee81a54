pub mod error;

pub use error::{AppError, ComparisonError, LoadError, ResolutionError, StorageError, ViewError};
