use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Price;

/// Where an offer's image currently points.
///
/// Loaded offers carry the raw storage key; the resolver swaps it for a
/// signed URL, or marks it unavailable when signing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageRef {
    Key { key: String },
    Signed { url: String, expires_at: DateTime<Utc> },
    Unavailable,
}

impl ImageRef {
    pub fn key(key: impl Into<String>) -> Self {
        ImageRef::Key { key: key.into() }
    }

    /// URL to render, falling back to `placeholder` for anything not signed.
    pub fn href<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            ImageRef::Signed { url, .. } => url,
            ImageRef::Key { .. } | ImageRef::Unavailable => placeholder,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, ImageRef::Signed { .. })
    }

    pub fn storage_key(&self) -> Option<&str> {
        match self {
            ImageRef::Key { key } => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub website: String,
    pub price: Price,
    pub url: String,
    pub image: ImageRef,
}

impl Offer {
    pub fn new(
        website: impl Into<String>,
        price: Price,
        url: impl Into<String>,
        image_key: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            price,
            url: url.into(),
            image: ImageRef::key(image_key),
        }
    }
}
