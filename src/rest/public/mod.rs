//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::BudaError;
use crate::rest::RestClient;
use crate::rest::endpoints::{keys, public};

impl RestClient {
    /// Get all markets.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use buda_api_client::rest::RestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::new();
    ///     for market in client.get_markets().await? {
    ///         println!("{}: {} / {}", market.id, market.base_currency, market.quote_currency);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_markets(&self) -> Result<Vec<Market>, BudaError> {
        self.public_get(public::MARKETS, keys::MARKETS).await
    }

    /// Get a single market.
    ///
    /// # Arguments
    ///
    /// * `market_id` - Market identifier (e.g., "btc-clp").
    pub async fn get_market(&self, market_id: &str) -> Result<Market, BudaError> {
        self.public_get(&public::market(market_id), keys::MARKET)
            .await
    }

    /// Get the traded volume of a market.
    pub async fn get_market_volume(&self, market_id: &str) -> Result<Volume, BudaError> {
        self.public_get(&public::market_volume(market_id), keys::VOLUME)
            .await
    }

    /// Get the ticker of a market.
    pub async fn get_ticker(&self, market_id: &str) -> Result<Ticker, BudaError> {
        self.public_get(&public::market_ticker(market_id), keys::TICKER)
            .await
    }

    /// Get the order book of a market.
    pub async fn get_order_book(&self, market_id: &str) -> Result<OrderBook, BudaError> {
        self.public_get(&public::market_order_book(market_id), keys::ORDER_BOOK)
            .await
    }

    /// Get recent trades of a market.
    ///
    /// # Arguments
    ///
    /// * `market_id` - Market identifier.
    /// * `timestamp` - Only return trades older than this timestamp (ms).
    pub async fn get_trades(
        &self,
        market_id: &str,
        timestamp: Option<u64>,
    ) -> Result<Trades, BudaError> {
        self.public_get_with_params(
            &public::market_trades(market_id),
            keys::TRADES,
            &TradesRequest { timestamp },
        )
        .await
    }
}
