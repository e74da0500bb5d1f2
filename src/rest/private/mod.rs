//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Orders, deposits and withdrawals are paginated server side; they are
//! fetched with [`RestClient::fetch_all_pages`] and returned in full.

mod types;

pub use types::*;

use crate::error::BudaError;
use crate::rest::RestClient;
use crate::rest::endpoints::{keys, private};

impl RestClient {
    /// Get the balances of all currencies.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use buda_api_client::rest::RestClient;
    /// use buda_api_client::auth::Credentials;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Credentials::new("key", "secret")?;
    ///     let client = RestClient::builder().credentials(credentials).build();
    ///
    ///     for balance in client.get_balances().await? {
    ///         println!("{}: {}", balance.id, balance.available_amount);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_balances(&self) -> Result<Vec<Balance>, BudaError> {
        self.private_get(private::BALANCES, keys::BALANCES).await
    }

    /// Get the balance of one currency.
    pub async fn get_balance(&self, currency: &str) -> Result<Balance, BudaError> {
        self.private_get(&private::balance(currency), keys::BALANCE)
            .await
    }

    /// Get a single order by id.
    pub async fn get_order(&self, order_id: u64) -> Result<Order, BudaError> {
        self.private_get(&private::order(order_id), keys::ORDER).await
    }

    /// Get every order of a market, optionally filtered by state.
    ///
    /// # Arguments
    ///
    /// * `market_id` - Market identifier (e.g., "btc-clp").
    /// * `state` - Order state filter (e.g., "traded", "canceled").
    pub async fn get_orders(
        &self,
        market_id: &str,
        state: Option<&str>,
    ) -> Result<Vec<Order>, BudaError> {
        self.fetch_all_pages(&private::market_orders(market_id), keys::ORDERS, state)
            .await
    }

    /// Get every withdrawal of a currency, optionally filtered by state.
    pub async fn get_withdrawals(
        &self,
        currency: &str,
        state: Option<&str>,
    ) -> Result<Vec<Withdrawal>, BudaError> {
        self.fetch_all_pages(&private::withdrawals(currency), keys::WITHDRAWALS, state)
            .await
    }

    /// Get every deposit of a currency, optionally filtered by state.
    pub async fn get_deposits(
        &self,
        currency: &str,
        state: Option<&str>,
    ) -> Result<Vec<Deposit>, BudaError> {
        self.fetch_all_pages(&private::deposits(currency), keys::DEPOSITS, state)
            .await
    }

    /// Get the withdrawal fee of a currency.
    pub async fn get_withdrawal_fee(&self, currency: &str) -> Result<Fee, BudaError> {
        self.private_get(&private::withdrawal_fee(currency), keys::FEE)
            .await
    }

    /// Get the deposit fee of a currency.
    pub async fn get_deposit_fee(&self, currency: &str) -> Result<Fee, BudaError> {
        self.private_get(&private::deposit_fee(currency), keys::FEE)
            .await
    }

    /// Get a receive address of a currency.
    ///
    /// # Arguments
    ///
    /// * `currency` - Currency code (e.g., "BTC").
    /// * `address_id` - Receive address identifier.
    pub async fn get_receive_address(
        &self,
        currency: &str,
        address_id: u64,
    ) -> Result<ReceiveAddress, BudaError> {
        self.private_get(
            &private::receive_address(currency, address_id),
            keys::RECEIVE_ADDRESS,
        )
        .await
    }
}
