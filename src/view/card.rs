use serde::Serialize;

use crate::catalog::compare;
use crate::config::AppConfig;
use crate::models::{Offer, Price, Product};
use crate::utils::error::ComparisonError;

/// Display settings shared by every card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSettings {
    pub currency_symbol: String,
    pub placeholder_image: String,
}

impl CardSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            currency_symbol: config.display.currency_symbol.clone(),
            placeholder_image: config.resolver.placeholder_image.clone(),
        }
    }
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            placeholder_image: "/static/image-unavailable.svg".to_string(),
        }
    }
}

/// `₹75000` for finite prices, the bare marker for unavailable ones.
pub fn format_price(price: &Price, currency_symbol: &str) -> String {
    match price {
        Price::Finite(_) => format!("{}{}", currency_symbol, price),
        Price::Unavailable => price.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferLine {
    pub website: String,
    pub price: Price,
    pub formatted_price: String,
    pub url: String,
}

impl OfferLine {
    fn from_offer(offer: &Offer, settings: &CardSettings) -> Self {
        Self {
            website: offer.website.clone(),
            price: offer.price,
            formatted_price: format_price(&offer.price, &settings.currency_symbol),
            url: offer.url.clone(),
        }
    }
}

/// Everything the dashboard renders for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub name: String,
    pub display_name: String,
    pub lowest: OfferLine,
    pub others: Vec<OfferLine>,
    pub image: String,
    pub savings: Option<String>,
}

impl ProductCard {
    pub fn build(product: &Product, settings: &CardSettings) -> Result<Self, ComparisonError> {
        let comparison = compare(product)?;
        let savings = comparison.savings().zip(comparison.savings_percentage()).map(|(amount, pct)| {
            format!(
                "Save {} ({}%)",
                format_price(&Price::Finite(amount), &settings.currency_symbol),
                pct.normalize()
            )
        });

        Ok(Self {
            name: product.name.clone(),
            display_name: product.display_name(),
            lowest: OfferLine::from_offer(comparison.lowest, settings),
            others: comparison
                .others
                .iter()
                .map(|offer| OfferLine::from_offer(offer, settings))
                .collect(),
            image: comparison.lowest.image.href(&settings.placeholder_image).to_string(),
            savings,
        })
    }
}
