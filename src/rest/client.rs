//! Buda REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;

use crate::auth::{Authenticator, Credentials, IncreasingNonce, NonceProvider};
use crate::error::{ApiError, BudaError};
use crate::rest::endpoints::{BUDA_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::rest::private::{Balance, Deposit, Fee, Order, ReceiveAddress, Withdrawal};
use crate::rest::public::{Market, OrderBook, Ticker, Trades, Volume};
use crate::rest::traits::BudaClient;
use crate::types::Envelope;

/// Connection and pagination settings of a [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL including the API version prefix.
    pub base_url: String,
    /// Items requested per page of a paginated collection.
    pub page_size: u32,
    /// Maximum page requests in flight during one paginated fetch.
    ///
    /// `None` starts every remaining page at once.
    pub max_concurrent_pages: Option<usize>,
    /// Turn non-2xx responses into [`BudaError::Api`] instead of decoding them.
    pub check_status: bool,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: BUDA_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_pages: None,
            check_status: true,
            timeout: None,
        }
    }
}

/// The Buda REST API client.
///
/// This client provides access to the Buda market data and account endpoints.
/// Private endpoints are signed with the configured credentials; paginated
/// collections are fetched concurrently and returned as one `Vec`.
///
/// # Example
///
/// ```rust,no_run
/// use buda_api_client::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client for public endpoints only
///     let client = RestClient::new();
///
///     let markets = client.get_markets().await?;
///     println!("Markets: {:?}", markets);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use buda_api_client::rest::RestClient;
/// use buda_api_client::auth::Credentials;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Credentials::new("api_key", "api_secret")?;
///     let client = RestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let orders = client.get_orders("btc-clp", Some("traded")).await?;
///     println!("Traded orders: {}", orders.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    config: Arc<RestConfig>,
    authenticator: Option<Authenticator>,
}

impl RestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`RestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Issue a GET and return the raw response body.
    ///
    /// `path_and_query` is appended to the base URL. When `authenticated` is
    /// set the request is signed first. With [`RestConfig::check_status`] off
    /// the body is returned whatever the status code.
    pub async fn fetch_raw(
        &self,
        path_and_query: &str,
        authenticated: bool,
    ) -> Result<Vec<u8>, BudaError> {
        let url = format!("{}{}", self.config.base_url, path_and_query);
        let mut request = self.http_client.get(&url).build()?;

        if authenticated {
            let authenticator = self
                .authenticator
                .as_ref()
                .ok_or(BudaError::MissingCredentials)?;
            request = authenticator.authenticate(request)?;
        }

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(BudaError::ResponseBody)?;

        if self.config.check_status && !status.is_success() {
            let error = ApiError::from_body(status.as_u16(), &body);
            tracing::debug!(%status, path = path_and_query, "Buda API returned an error");
            return Err(BudaError::Api(error));
        }

        Ok(body.to_vec())
    }

    /// Fetch and decode the payload stored under `key`.
    pub(crate) async fn get_resource<T>(
        &self,
        path_and_query: &str,
        key: &str,
        authenticated: bool,
    ) -> Result<T, BudaError>
    where
        T: DeserializeOwned,
    {
        let body = self.fetch_raw(path_and_query, authenticated).await?;
        Ok(Envelope::<T>::from_slice(&body, key)?.data)
    }

    /// Make a public GET request.
    pub(crate) async fn public_get<T>(&self, endpoint: &str, key: &str) -> Result<T, BudaError>
    where
        T: DeserializeOwned,
    {
        self.get_resource(endpoint, key, false).await
    }

    /// Make a public GET request with query parameters.
    pub(crate) async fn public_get_with_params<T, Q>(
        &self,
        endpoint: &str,
        key: &str,
        params: &Q,
    ) -> Result<T, BudaError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let path = with_query(endpoint, params)?;
        self.get_resource(&path, key, false).await
    }

    /// Make an authenticated GET request.
    pub(crate) async fn private_get<T>(&self, endpoint: &str, key: &str) -> Result<T, BudaError>
    where
        T: DeserializeOwned,
    {
        self.get_resource(endpoint, key, true).await
    }
}

impl BudaClient for RestClient {
    // ========== Public Endpoints ==========

    async fn get_markets(&self) -> Result<Vec<Market>, BudaError> {
        RestClient::get_markets(self).await
    }

    async fn get_market(&self, market_id: &str) -> Result<Market, BudaError> {
        RestClient::get_market(self, market_id).await
    }

    async fn get_market_volume(&self, market_id: &str) -> Result<Volume, BudaError> {
        RestClient::get_market_volume(self, market_id).await
    }

    async fn get_ticker(&self, market_id: &str) -> Result<Ticker, BudaError> {
        RestClient::get_ticker(self, market_id).await
    }

    async fn get_order_book(&self, market_id: &str) -> Result<OrderBook, BudaError> {
        RestClient::get_order_book(self, market_id).await
    }

    async fn get_trades(
        &self,
        market_id: &str,
        timestamp: Option<u64>,
    ) -> Result<Trades, BudaError> {
        RestClient::get_trades(self, market_id, timestamp).await
    }

    // ========== Private Endpoints - Account ==========

    async fn get_balances(&self) -> Result<Vec<Balance>, BudaError> {
        RestClient::get_balances(self).await
    }

    async fn get_balance(&self, currency: &str) -> Result<Balance, BudaError> {
        RestClient::get_balance(self, currency).await
    }

    async fn get_order(&self, order_id: u64) -> Result<Order, BudaError> {
        RestClient::get_order(self, order_id).await
    }

    async fn get_orders(
        &self,
        market_id: &str,
        state: Option<&str>,
    ) -> Result<Vec<Order>, BudaError> {
        RestClient::get_orders(self, market_id, state).await
    }

    // ========== Private Endpoints - Funding ==========

    async fn get_withdrawals(
        &self,
        currency: &str,
        state: Option<&str>,
    ) -> Result<Vec<Withdrawal>, BudaError> {
        RestClient::get_withdrawals(self, currency, state).await
    }

    async fn get_deposits(
        &self,
        currency: &str,
        state: Option<&str>,
    ) -> Result<Vec<Deposit>, BudaError> {
        RestClient::get_deposits(self, currency, state).await
    }

    async fn get_withdrawal_fee(&self, currency: &str) -> Result<Fee, BudaError> {
        RestClient::get_withdrawal_fee(self, currency).await
    }

    async fn get_deposit_fee(&self, currency: &str) -> Result<Fee, BudaError> {
        RestClient::get_deposit_fee(self, currency).await
    }

    async fn get_receive_address(
        &self,
        currency: &str,
        address_id: u64,
    ) -> Result<ReceiveAddress, BudaError> {
        RestClient::get_receive_address(self, currency, address_id).await
    }
}

/// Append the URL-encoded `params` to `endpoint`.
pub(crate) fn with_query<Q>(endpoint: &str, params: &Q) -> Result<String, BudaError>
where
    Q: serde::Serialize + ?Sized,
{
    let query_string = serde_urlencoded::to_string(params)
        .map_err(|e| BudaError::InvalidResponse(e.to_string()))?;
    Ok(if query_string.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query_string)
    })
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .field("has_credentials", &self.authenticator.is_some())
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    config: RestConfig,
    credentials: Option<Credentials>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: RestConfig::default(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
        }
    }

    /// Replace all connection and pagination settings at once.
    pub fn config(mut self, config: RestConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the number of items requested per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Cap the page requests in flight during a paginated fetch.
    pub fn max_concurrent_pages(mut self, limit: usize) -> Self {
        self.config.max_concurrent_pages = Some(limit);
        self
    }

    /// Choose whether non-2xx responses become [`BudaError::Api`].
    pub fn check_status(mut self, check: bool) -> Self {
        self.config.check_status = check;
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the credentials for authenticated requests.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Clients sharing one API key should share one provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("buda-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("buda-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.config.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let authenticator = self.credentials.map(|credentials| {
            let nonce_provider = self
                .nonce_provider
                .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));
            Authenticator::new(credentials, nonce_provider)
        });

        RestClient {
            http_client: client,
            config: Arc::new(self.config),
            authenticator,
        }
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
