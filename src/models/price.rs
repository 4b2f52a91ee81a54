use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Literal the sanitizer writes in place of the overflow token.
pub const UNAVAILABLE_MARKER: &str = "Unavailable";

/// A site's current price.
///
/// `Unavailable` sorts after every finite price, so a comparison over prices
/// only lands on it when nothing else is on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Price {
    Finite(Decimal),
    Unavailable,
}

impl Price {
    /// Builds a finite price, rejecting negative amounts.
    pub fn finite(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            None
        } else {
            Some(Price::Finite(amount))
        }
    }

    pub fn from_number(number: &serde_json::Number) -> Option<Self> {
        let amount = if let Some(n) = number.as_u64() {
            Decimal::from(n)
        } else if let Some(n) = number.as_i64() {
            Decimal::from(n)
        } else {
            number.as_f64().and_then(Decimal::from_f64)?
        };
        Self::finite(amount)
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Price::Finite(amount) => Some(*amount),
            Price::Unavailable => None,
        }
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Price::Finite(a), Price::Finite(b)) => a.cmp(b),
            (Price::Finite(_), Price::Unavailable) => Ordering::Less,
            (Price::Unavailable, Price::Finite(_)) => Ordering::Greater,
            (Price::Unavailable, Price::Unavailable) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Finite(amount) => write!(f, "{}", amount.normalize()),
            Price::Unavailable => f.write_str(UNAVAILABLE_MARKER),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Finite(amount) => Serialize::serialize(amount, serializer),
            Price::Unavailable => serializer.serialize_str(UNAVAILABLE_MARKER),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PriceRepr::deserialize(deserializer)? {
            PriceRepr::Number(number) => Price::from_number(&number)
                .ok_or_else(|| de::Error::custom(format!("invalid price {}", number))),
            PriceRepr::Text(text) if text == UNAVAILABLE_MARKER => Ok(Price::Unavailable),
            PriceRepr::Text(text) => Err(de::Error::custom(format!(
                "unexpected price marker {:?}",
                text
            ))),
        }
    }
}
