//! Trait definition for the Buda REST API client.
//!
//! [`BudaClient`] abstracts every REST operation so that callers can be
//! written against a mock or a wrapping implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use buda_api_client::rest::{BudaClient, RestClient};
//!
//! async fn total_btc<C: BudaClient>(client: &C) -> Result<(), buda_api_client::BudaError> {
//!     let balance = client.get_balance("BTC").await?;
//!     println!("BTC: {}", balance.amount);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::BudaError;
use crate::rest::private::{Balance, Deposit, Fee, Order, ReceiveAddress, Withdrawal};
use crate::rest::public::{Market, OrderBook, Ticker, Trades, Volume};

/// Trait defining all Buda REST API operations.
///
/// All methods are async and return `Result<T, BudaError>`.
pub trait BudaClient: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get all markets.
    fn get_markets(&self) -> impl Future<Output = Result<Vec<Market>, BudaError>> + Send;

    /// Get a single market.
    fn get_market(
        &self,
        market_id: &str,
    ) -> impl Future<Output = Result<Market, BudaError>> + Send;

    /// Get the traded volume of a market.
    fn get_market_volume(
        &self,
        market_id: &str,
    ) -> impl Future<Output = Result<Volume, BudaError>> + Send;

    /// Get the ticker of a market.
    fn get_ticker(
        &self,
        market_id: &str,
    ) -> impl Future<Output = Result<Ticker, BudaError>> + Send;

    /// Get the order book of a market.
    fn get_order_book(
        &self,
        market_id: &str,
    ) -> impl Future<Output = Result<OrderBook, BudaError>> + Send;

    /// Get recent trades of a market.
    fn get_trades(
        &self,
        market_id: &str,
        timestamp: Option<u64>,
    ) -> impl Future<Output = Result<Trades, BudaError>> + Send;

    // ========== Private Endpoints - Account ==========

    /// Get the balances of all currencies.
    fn get_balances(&self) -> impl Future<Output = Result<Vec<Balance>, BudaError>> + Send;

    /// Get the balance of one currency.
    fn get_balance(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Balance, BudaError>> + Send;

    /// Get a single order.
    fn get_order(&self, order_id: u64) -> impl Future<Output = Result<Order, BudaError>> + Send;

    /// Get every order of a market.
    fn get_orders(
        &self,
        market_id: &str,
        state: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Order>, BudaError>> + Send;

    // ========== Private Endpoints - Funding ==========

    /// Get every withdrawal of a currency.
    fn get_withdrawals(
        &self,
        currency: &str,
        state: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Withdrawal>, BudaError>> + Send;

    /// Get every deposit of a currency.
    fn get_deposits(
        &self,
        currency: &str,
        state: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Deposit>, BudaError>> + Send;

    /// Get the withdrawal fee of a currency.
    fn get_withdrawal_fee(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Fee, BudaError>> + Send;

    /// Get the deposit fee of a currency.
    fn get_deposit_fee(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Fee, BudaError>> + Send;

    /// Get a receive address of a currency.
    fn get_receive_address(
        &self,
        currency: &str,
        address_id: u64,
    ) -> impl Future<Output = Result<ReceiveAddress, BudaError>> + Send;
}
