//! Types for public REST API endpoints.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::types::{Amount, Direction, PriceLevel};

/// A tradable market.
#[derive(Debug, Clone, Deserialize)]
pub struct Market {
    /// Market identifier (e.g., "BTC-CLP").
    pub id: String,
    /// Display name (e.g., "btc-clp").
    pub name: String,
    /// Currency being bought or sold.
    pub base_currency: String,
    /// Currency prices are quoted in.
    pub quote_currency: String,
    /// Smallest order accepted, in the base currency.
    pub minimum_order_amount: Amount,
}

/// Traded volume of a market.
#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    /// Market identifier.
    pub market_id: String,
    /// Volume of asks executed in the last 24 hours.
    pub ask_volume_24h: Amount,
    /// Volume of asks executed in the last 7 days.
    pub ask_volume_7d: Amount,
    /// Volume of bids executed in the last 24 hours.
    pub bid_volume_24h: Amount,
    /// Volume of bids executed in the last 7 days.
    pub bid_volume_7d: Amount,
}

/// Ticker of a market.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Market identifier, when the server includes it.
    #[serde(default)]
    pub market_id: Option<String>,
    /// Price of the last trade.
    pub last_price: Amount,
    /// Highest bid.
    pub max_bid: Amount,
    /// Lowest ask.
    pub min_ask: Amount,
    /// Relative price change over 24 hours (0.01 = 1%).
    pub price_variation_24h: Decimal,
    /// Relative price change over 7 days.
    pub price_variation_7d: Decimal,
    /// Traded volume over 24 hours.
    pub volume: Amount,
}

impl Ticker {
    /// Midpoint between the best bid and the best ask.
    pub fn mid_price(&self) -> Decimal {
        (self.max_bid.value + self.min_ask.value) / Decimal::TWO
    }

    /// Difference between the best ask and the best bid.
    pub fn spread(&self) -> Decimal {
        self.min_ask.value - self.max_bid.value
    }
}

/// Order book of a market.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Ask levels, best first.
    pub asks: Vec<PriceLevel>,
    /// Bid levels, best first.
    pub bids: Vec<PriceLevel>,
}

impl OrderBook {
    /// The best (lowest) ask.
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// The best (highest) bid.
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }
}

/// Recent trades of a market.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct Trades {
    /// Market identifier.
    pub market_id: String,
    /// Timestamp (ms) the listing starts from.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub timestamp: Option<u64>,
    /// Timestamp (ms) of the oldest trade returned; pass it back to page further.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub last_timestamp: Option<u64>,
    /// Trades, newest first.
    pub entries: Vec<TradeEntry>,
}

/// Request parameters for recent trades.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesRequest {
    /// Return trades older than this timestamp (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// A single trade: `["timestamp", "amount", "price", "direction", id]`.
///
/// The trailing trade id is missing on older listings.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEntry {
    /// Execution time in milliseconds since the UNIX epoch.
    pub timestamp: u64,
    /// Traded amount, in the base currency.
    pub amount: Decimal,
    /// Execution price, in the quote currency.
    pub price: Decimal,
    /// Side of the taker.
    pub direction: Direction,
    /// Trade identifier.
    pub id: Option<u64>,
}

impl<'de> Deserialize<'de> for TradeEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TradeEntryVisitor;

        impl<'de> Visitor<'de> for TradeEntryVisitor {
            type Value = TradeEntry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a trade array [timestamp, amount, price, direction, id?]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let timestamp: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let timestamp = timestamp.parse().map_err(de::Error::custom)?;
                let amount = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let price = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let direction = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let id = seq.next_element::<Option<u64>>()?.flatten();

                Ok(TradeEntry {
                    timestamp,
                    amount,
                    price,
                    direction,
                    id,
                })
            }
        }

        deserializer.deserialize_seq(TradeEntryVisitor)
    }
}
