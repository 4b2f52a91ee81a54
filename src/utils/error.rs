use thiserror::Error;

/// Failures reading from the object store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid object URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Object {bucket}/{key} returned status {status}")]
    Status {
        bucket: String,
        key: String,
        status: u16,
    },
}

/// Failures that abort a whole catalog load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Catalog storage unreachable: {0}")]
    Unreachable(#[source] StorageError),

    #[error("Malformed catalog: {reason}")]
    Malformed { reason: String },
}

impl LoadError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Per-offer image resolution failure. Never escalated past the resolver.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Empty image reference")]
    EmptyKey,

    #[error("Signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid signed URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid ttl: {0}")]
    InvalidTtl(String),

    #[error("Signer unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("Product {product} has no offers")]
    NoOffers { product: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Catalog load already started")]
    AlreadyInitialized,

    #[error("Invalid view transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Catalog not ready ({status})")]
    NotReady {
        status: &'static str,
        message: Option<String>,
    },

    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Comparison error: {0}")]
    Comparison(#[from] ComparisonError),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
