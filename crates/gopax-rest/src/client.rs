//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::query::{BookLevel, CandleQuery, TradeWindow};
use crate::transport::{Transport, DEFAULT_BASE_URL};
use crate::types::{
    Asset, Balance, Candle, CreatedOrder, NamedPairStats, Order, OrderBook, OrderRequest,
    PairStats, PublicTrade, Ticker, Trade, TradingPair,
};
use gopax_auth::{Credentials, NonceSource};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("gopax-rest/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the API host
pub const ENV_BASE_URL: &str = "GOPAX_BASE_URL";

/// GOPAX REST API client
///
/// Provides access to both public and private endpoints.
///
/// # Example
///
/// ```no_run
/// use gopax_rest::{GopaxRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = GopaxRestClient::new();
///     let ticker = client.get_ticker("BTC-KRW").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = GopaxRestClient::with_credentials(creds);
///     let balances = auth_client.get_balances().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GopaxRestClient {
    transport: Transport,
    credentials: Option<Credentials>,
}

impl GopaxRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .expect("Failed to create HTTP client");

        info!(base_url = %config.base_url, "Created GOPAX REST client");

        Self {
            transport: Transport::new(http_client, config.base_url, config.nonce_source),
            credentials: config.credentials,
        }
    }

    /// Create a client from `GOPAX_BASE_URL`, `GOPAX_API_KEY` and `GOPAX_SECRET`
    pub fn from_env() -> RestResult<Self> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// API host requests are sent to
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.transport)
    }

    /// Get listed assets
    pub async fn get_assets(&self) -> RestResult<Vec<Asset>> {
        self.market().get_assets().await
    }

    /// Get listed trading pairs
    pub async fn get_trading_pairs(&self) -> RestResult<Vec<TradingPair>> {
        self.market().get_trading_pairs().await
    }

    /// Get ticker information for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "BTC-KRW", "ETH-KRW")
    pub async fn get_ticker(&self, pair: &str) -> RestResult<Ticker> {
        self.market().get_ticker(pair).await
    }

    /// Get orderbook depth for a trading pair
    pub async fn get_orderbook(&self, pair: &str, level: BookLevel) -> RestResult<OrderBook> {
        self.market().get_orderbook(pair, level).await
    }

    /// Get recent public trades for a trading pair
    pub async fn get_pair_trades(
        &self,
        pair: &str,
        window: &TradeWindow,
    ) -> RestResult<Vec<PublicTrade>> {
        self.market().get_trades(pair, window).await
    }

    /// Get 24h statistics for a trading pair
    pub async fn get_stats(&self, pair: &str) -> RestResult<PairStats> {
        self.market().get_stats(pair).await
    }

    /// Get candles for a trading pair
    pub async fn get_candles(&self, pair: &str, query: &CandleQuery) -> RestResult<Vec<Candle>> {
        self.market().get_candles(pair, query).await
    }

    /// Get 24h statistics for every trading pair
    pub async fn get_all_stats(&self) -> RestResult<Vec<NamedPairStats>> {
        self.market().get_all_stats().await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(&self.transport, creds))
    }

    /// Get all balances
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.account()?.get_balances().await
    }

    /// Get the balance of one asset
    pub async fn get_balance(&self, asset: &str) -> RestResult<Balance> {
        self.account()?.get_balance(asset).await
    }

    /// Get the account's trades
    pub async fn get_trades(&self, window: &TradeWindow) -> RestResult<Vec<Trade>> {
        self.account()?.get_trades(window).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(TradingEndpoints::new(&self.transport, creds))
    }

    /// Place a new order
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<CreatedOrder> {
        self.trading()?.place_order(order).await
    }

    /// Get the account's orders
    pub async fn get_orders(&self) -> RestResult<Vec<Order>> {
        self.trading()?.get_orders().await
    }

    /// Get one order by id
    pub async fn get_order(&self, order_id: &str) -> RestResult<Order> {
        self.trading()?.get_order(order_id).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<()> {
        self.trading()?.cancel_order(order_id).await
    }
}

impl Default for GopaxRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GopaxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GopaxRestClient")
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// API host, without trailing slash
    pub base_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Nonce source for signed requests (process-wide clock if unset)
    pub nonce_source: Option<Arc<dyn NonceSource>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            nonce_source: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the environment
    ///
    /// `GOPAX_BASE_URL` overrides the host when set. Credentials are loaded
    /// when both `GOPAX_API_KEY` and `GOPAX_SECRET` are set; a set but
    /// invalid secret is an error.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }

        match Credentials::from_env() {
            Ok(credentials) => config.credentials = Some(credentials),
            Err(gopax_auth::AuthError::EnvVarNotSet(_)) => {}
            Err(e) => return Err(e.into()),
        }

        Ok(config)
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the nonce source used for signed requests
    pub fn with_nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = Some(source);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("custom_nonce_source", &self.nonce_source.is_some())
            .finish()
    }
}
