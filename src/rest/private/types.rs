//! Types for private REST API endpoints.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::types::Amount;
use crate::types::serde_helpers::empty_string_as_none;

/// Balance of one currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Currency code (e.g., "BTC").
    pub id: String,
    /// Total amount held.
    pub amount: Amount,
    /// Amount free to trade or withdraw.
    pub available_amount: Amount,
    /// Amount locked in open orders.
    pub frozen_amount: Amount,
    /// Amount reserved for pending withdrawals.
    pub pending_withdraw_amount: Amount,
    /// Owning account.
    pub account_id: u64,
}

/// An order placed in a market.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: u64,
    /// "Bid" or "Ask".
    #[serde(rename = "type")]
    pub order_type: String,
    /// Order state (e.g., "pending", "traded", "canceled").
    pub state: String,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Market identifier.
    pub market_id: String,
    /// Owning account.
    pub account_id: u64,
    /// Currency the fee is charged in.
    pub fee_currency: String,
    /// "limit" or "market".
    pub price_type: String,
    /// Limit price; absent on market orders.
    #[serde(default)]
    pub limit: Option<Amount>,
    /// Amount still pending execution.
    pub amount: Amount,
    /// Amount at creation.
    pub original_amount: Amount,
    /// Amount executed so far.
    pub traded_amount: Amount,
    /// Total exchanged in the quote currency.
    pub total_exchanged: Amount,
    /// Fee paid so far.
    pub paid_fee: Amount,
}

/// Transfer details of a deposit.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositData {
    /// Kind of deposit data.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Address the funds were sent to.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub address: Option<String>,
    /// On-chain transaction hash, once known.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub tx_hash: Option<String>,
}

/// A deposit into the account.
#[derive(Debug, Clone, Deserialize)]
pub struct Deposit {
    /// Deposit identifier.
    pub id: u64,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update time.
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
    /// Deposited amount.
    pub amount: Amount,
    /// Currency code.
    pub currency: String,
    /// Deposit state (e.g., "pending_info", "confirmed", "rejected").
    pub state: String,
    /// Transfer details.
    pub deposit_data: DepositData,
}

/// Transfer details of a withdrawal.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalData {
    /// Kind of withdrawal data.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Destination address.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub target_address: Option<String>,
    /// On-chain transaction hash, once known.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub tx_hash: Option<String>,
}

/// A withdrawal from the account.
#[derive(Debug, Clone, Deserialize)]
pub struct Withdrawal {
    /// Withdrawal identifier.
    pub id: u64,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update time.
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
    /// Withdrawal state (e.g., "pending_execution", "confirmed").
    pub state: String,
    /// Withdrawn amount.
    pub amount: Amount,
    /// Fee charged.
    pub fee: Amount,
    /// Currency code.
    pub currency: String,
    /// Transfer details.
    pub withdrawal_data: WithdrawalData,
}

/// Deposit or withdrawal fee of a currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Fee {
    /// "deposit" or "withdrawal".
    pub name: String,
    /// Proportional part of the fee, in percent.
    pub percent: f64,
    /// Fixed part of the fee.
    pub base: Amount,
}

/// A receive address for deposits.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiveAddress {
    /// Address identifier.
    pub id: u64,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update time.
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
    /// The address itself; empty until it has been generated.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub address: Option<String>,
    /// Whether funds have been received on it.
    pub used: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_order_deserialize() {
        let json = r#"{
            "id": 1,
            "type": "Ask",
            "state": "traded",
            "created_at": "2017-06-14T21:58:29.452Z",
            "market_id": "BTC-CLP",
            "account_id": 5,
            "fee_currency": "CLP",
            "price_type": "limit",
            "limit": ["1000000.0", "CLP"],
            "amount": ["0.0", "BTC"],
            "original_amount": ["0.1", "BTC"],
            "traded_amount": ["0.1", "BTC"],
            "total_exchanged": ["100000.0", "CLP"],
            "paid_fee": ["800.0", "CLP"]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_type, "Ask");
        assert_eq!(order.created_at.year(), 2017);
        assert_eq!(order.limit.unwrap().value, Decimal::from(1_000_000));
    }

    #[test]
    fn test_market_order_without_limit() {
        let json = r#"{
            "id": 2, "type": "Bid", "state": "pending",
            "created_at": "2021-01-01T00:00:00Z",
            "market_id": "ETH-CLP", "account_id": 5, "fee_currency": "ETH",
            "price_type": "market", "limit": null,
            "amount": ["1.0", "ETH"], "original_amount": ["1.0", "ETH"],
            "traded_amount": ["0.0", "ETH"], "total_exchanged": ["0.0", "CLP"],
            "paid_fee": ["0.0", "ETH"]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.limit.is_none());
    }

    #[test]
    fn test_deposit_with_pending_hash() {
        let json = r#"{
            "id": 10,
            "created_at": "2018-03-01T12:00:00.000Z",
            "updated_at": null,
            "amount": ["0.5", "BTC"],
            "currency": "BTC",
            "state": "pending_info",
            "deposit_data": {"type": "deposit_data", "address": "1abc", "tx_hash": ""}
        }"#;
        let deposit: Deposit = serde_json::from_str(json).unwrap();
        assert!(deposit.updated_at.is_none());
        assert_eq!(deposit.deposit_data.address.as_deref(), Some("1abc"));
        assert!(deposit.deposit_data.tx_hash.is_none());
    }

    #[test]
    fn test_fee_deserialize() {
        let json = r#"{"name": "withdrawal", "percent": 0, "base": ["0.00005", "BTC"]}"#;
        let fee: Fee = serde_json::from_str(json).unwrap();
        assert_eq!(fee.percent, 0.0);
        assert_eq!(fee.base.currency, "BTC");
    }
}
