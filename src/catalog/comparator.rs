use rust_decimal::Decimal;

use crate::models::{Offer, Product};
use crate::utils::error::ComparisonError;

/// Cheapest offer of a product plus the offers from every other site.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<'a> {
    pub lowest: &'a Offer,
    pub others: Vec<&'a Offer>,
    highest_finite: Option<Decimal>,
    finite_prices: usize,
}

impl Comparison<'_> {
    /// Highest finite price minus the lowest one; needs at least two finite prices.
    pub fn savings(&self) -> Option<Decimal> {
        if self.finite_prices < 2 {
            return None;
        }
        let lowest = self.lowest.price.amount()?;
        let highest = self.highest_finite?;
        Some(highest - lowest)
    }

    /// Savings relative to the highest finite price, in percent.
    pub fn savings_percentage(&self) -> Option<Decimal> {
        let savings = self.savings()?;
        let highest = self.highest_finite?;
        if highest.is_zero() {
            return None;
        }
        Some((savings / highest * Decimal::ONE_HUNDRED).round_dp(2))
    }
}

/// Selects the lowest-priced offer with a left fold over strict less-than,
/// so the first of several equally cheap offers wins.
pub fn compare(product: &Product) -> Result<Comparison<'_>, ComparisonError> {
    let mut offers = product.sites.iter();
    let first = offers.next().ok_or_else(|| ComparisonError::NoOffers {
        product: product.name.clone(),
    })?;

    let lowest = offers.fold(first, |best, candidate| {
        if candidate.price < best.price {
            candidate
        } else {
            best
        }
    });

    let others = product
        .sites
        .iter()
        .filter(|o| o.website != lowest.website)
        .collect();

    let finite: Vec<Decimal> = product.sites.iter().filter_map(|o| o.price.amount()).collect();

    Ok(Comparison {
        lowest,
        others,
        highest_finite: finite.iter().max().copied(),
        finite_prices: finite.len(),
    })
}
