//! Common domain types for Buda API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its currency.
///
/// Buda encodes amounts as a two element array: `["0.5", "BTC"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Decimal, String)", into = "(Decimal, String)")]
pub struct Amount {
    /// The numeric value.
    pub value: Decimal,
    /// Currency code (e.g., "BTC", "CLP").
    pub currency: String,
}

impl Amount {
    /// Create a new amount.
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

impl From<(Decimal, String)> for Amount {
    fn from((value, currency): (Decimal, String)) -> Self {
        Self { value, currency }
    }
}

impl From<Amount> for (Decimal, String) {
    fn from(amount: Amount) -> Self {
        (amount.value, amount.currency)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// One price level of an order book: `["price", "amount"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Decimal, Decimal)", into = "(Decimal, Decimal)")]
pub struct PriceLevel {
    /// Limit price.
    pub price: Decimal,
    /// Amount resting at this price.
    pub amount: Decimal,
}

impl From<(Decimal, Decimal)> for PriceLevel {
    fn from((price, amount): (Decimal, Decimal)) -> Self {
        Self { price, amount }
    }
}

impl From<PriceLevel> for (Decimal, Decimal) {
    fn from(level: PriceLevel) -> Self {
        (level.price, level.amount)
    }
}

/// Side of a trade or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Buy side
    Buy,
    /// Sell side
    Sell,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "buy"),
            Direction::Sell => write!(f, "sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_amount_from_pair() {
        let amount: Amount = serde_json::from_str(r#"["0.00984", "BTC"]"#).unwrap();
        assert_eq!(amount.value, Decimal::from_str("0.00984").unwrap());
        assert_eq!(amount.currency, "BTC");
        assert_eq!(amount.to_string(), "0.00984 BTC");
    }

    #[test]
    fn test_optional_amount_null() {
        #[derive(Deserialize)]
        struct Order {
            limit: Option<Amount>,
        }

        let order: Order = serde_json::from_str(r#"{"limit": null}"#).unwrap();
        assert!(order.limit.is_none());
    }

    #[test]
    fn test_price_level() {
        let levels: Vec<PriceLevel> =
            serde_json::from_str(r#"[["3159999.0", "0.5"], ["3160000.0", "1.25"]]"#).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].amount, Decimal::from_str("1.25").unwrap());
    }
}
