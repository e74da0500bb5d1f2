//! Buda REST API endpoint constants and path templates.

/// Base URL for the Buda REST API.
pub const BUDA_BASE_URL: &str = "https://www.buda.com/api/v2";

/// Items requested per page of a paginated collection.
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Percent-encode one path segment.
///
/// Ids are caller input; a `/`, `?` or `#` in one must not change which
/// resource is requested or the URI that gets signed.
fn segment(value: &str) -> String {
    // byte_serialize writes a space as '+' and a literal '+' as "%2B".
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Public endpoints (no authentication required).
pub mod public {
    use super::segment;

    /// List all markets.
    pub const MARKETS: &str = "/markets";

    /// A single market.
    pub fn market(market_id: &str) -> String {
        format!("/markets/{}", segment(market_id))
    }

    /// Traded volume of a market.
    pub fn market_volume(market_id: &str) -> String {
        format!("/markets/{}/volume", segment(market_id))
    }

    /// Ticker of a market.
    pub fn market_ticker(market_id: &str) -> String {
        format!("/markets/{}/ticker", segment(market_id))
    }

    /// Order book of a market.
    pub fn market_order_book(market_id: &str) -> String {
        format!("/markets/{}/order_book", segment(market_id))
    }

    /// Recent trades of a market.
    pub fn market_trades(market_id: &str) -> String {
        format!("/markets/{}/trades", segment(market_id))
    }
}

/// Private endpoints (authentication required).
pub mod private {
    use super::segment;

    /// All balances of the account.
    pub const BALANCES: &str = "/balances";

    /// Balance of one currency.
    pub fn balance(currency: &str) -> String {
        format!("/balances/{}", segment(currency))
    }

    /// Orders placed in a market (paginated).
    pub fn market_orders(market_id: &str) -> String {
        format!("/markets/{}/orders", segment(market_id))
    }

    /// A single order.
    pub fn order(order_id: u64) -> String {
        format!("/orders/{order_id}")
    }

    /// Withdrawals of a currency (paginated).
    pub fn withdrawals(currency: &str) -> String {
        format!("/currencies/{}/withdrawals", segment(currency))
    }

    /// Deposits of a currency (paginated).
    pub fn deposits(currency: &str) -> String {
        format!("/currencies/{}/deposits", segment(currency))
    }

    /// Deposit fee of a currency.
    pub fn deposit_fee(currency: &str) -> String {
        format!("/currencies/{}/fees/deposit", segment(currency))
    }

    /// Withdrawal fee of a currency.
    pub fn withdrawal_fee(currency: &str) -> String {
        format!("/currencies/{}/fees/withdrawal", segment(currency))
    }

    /// A receive address of a currency.
    pub fn receive_address(currency: &str, address_id: u64) -> String {
        format!("/currencies/{}/receive_addresses/{address_id}", segment(currency))
    }
}

/// Keys under which each resource is found in the response envelope.
pub mod keys {
    pub const MARKETS: &str = "markets";
    pub const MARKET: &str = "market";
    pub const VOLUME: &str = "volume";
    pub const TICKER: &str = "ticker";
    pub const ORDER_BOOK: &str = "order_book";
    pub const TRADES: &str = "trades";
    pub const BALANCES: &str = "balances";
    pub const BALANCE: &str = "balance";
    pub const ORDERS: &str = "orders";
    pub const ORDER: &str = "order";
    pub const WITHDRAWALS: &str = "withdrawals";
    pub const DEPOSITS: &str = "deposits";
    pub const FEE: &str = "fee";
    pub const RECEIVE_ADDRESS: &str = "receive_address";
}
