//! Buda REST API client.
//!
//! Provides access to the Buda market data and account endpoints.
//!
//! # Trait-based API
//!
//! The [`BudaClient`] trait abstracts all REST API operations, so code can be
//! written against a mock implementation in tests.
//!
//! ```rust,ignore
//! use buda_api_client::rest::{BudaClient, RestClient};
//!
//! async fn use_client<C: BudaClient>(client: &C) -> Result<(), buda_api_client::BudaError> {
//!     let ticker = client.get_ticker("btc-clp").await?;
//!     println!("Last price: {}", ticker.last_price);
//!     Ok(())
//! }
//! ```

mod client;
pub mod endpoints;
pub mod pagination;
pub mod private;
pub mod public;
mod traits;

pub use client::{RestClient, RestClientBuilder, RestConfig};
pub use pagination::{Page, PageQuery};
pub use traits::BudaClient;
