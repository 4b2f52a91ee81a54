use serde::{Deserialize, Serialize};

use super::Offer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within one catalog load; slug-style, e.g. `iphone-16`.
    #[serde(rename = "product_name")]
    pub name: String,
    pub sites: Vec<Offer>,
}

impl Product {
    pub fn new(name: impl Into<String>, sites: Vec<Offer>) -> Self {
        Self {
            name: name.into(),
            sites,
        }
    }

    /// Human label: dashes become spaces.
    pub fn display_name(&self) -> String {
        self.name.replace('-', " ")
    }

    /// Case-insensitive substring match on the product name.
    pub fn name_contains(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
