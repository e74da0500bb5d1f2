//! # Buda API Client
//!
//! An async Rust client library for the Buda.com REST API.
//!
//! ## Features
//!
//! - Public market data: markets, tickers, order books, trades, volume
//! - Private account data: balances, orders, deposits, withdrawals, fees
//! - Request signing with HMAC-SHA384 and strictly increasing nonces
//! - Paginated collections fetched concurrently, failing on the first bad page
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use buda_api_client::rest::RestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new();
//!     let ticker = client.get_ticker("btc-clp").await?;
//!     println!("BTC-CLP: {}", ticker.last_price);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::BudaError;
pub use types::common::{Amount, Direction, PriceLevel};

/// Result type alias using BudaError
pub type Result<T> = std::result::Result<T, BudaError>;
