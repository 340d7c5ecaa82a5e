//! REST API client and contract checks for the GOPAX exchange
//!
//! This crate talks to the GOPAX REST API and checks that what comes back
//! matches each endpoint's documented contract.
//!
//! # Features
//!
//! - **Market Data**: Assets, trading pairs, ticker, orderbook, trades, stats, candles
//! - **Account**: Balances, trade history
//! - **Trading**: Place, fetch, and cancel orders
//! - **Contracts**: Listing order, depth truncation, windowing, order lifecycle
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA512 over `nonce + METHOD + path + body` by [`gopax_auth`].
//!
//! # Example
//!
//! ```no_run
//! use gopax_rest::{BookLevel, GopaxRestClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = GopaxRestClient::new();
//!     let book = client.get_orderbook("BTC-KRW", BookLevel::Top).await?;
//!     println!("BTC-KRW spread: {:?}", book.spread());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = GopaxRestClient::with_credentials(creds);
//!     let balances = auth_client.get_balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Nothing is retried. See [`RestError`] for how local, transport,
//! rejection and decode failures are told apart.

pub mod client;
pub mod contract;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod scenario;
pub mod types;
mod transport;

// Re-export main types
pub use client::{ClientConfig, GopaxRestClient};
pub use contract::{ContractResult, ContractViolation, OBSERVED_PRIVATE_TRADES_CAP};
pub use endpoints::Endpoint;
pub use error::{RejectionKind, RestError, RestResult};
pub use gopax_auth::Credentials;
pub use query::{BookLevel, CandleQuery, TradeWindow};
pub use scenario::{OrderScenario, TradeWindowProbe};
pub use transport::DEFAULT_BASE_URL;

// Re-export endpoint-specific types
pub use types::{
    // Market data
    Asset, BookEntry, Candle, NamedPairStats, OrderBook, PairStats, PublicTrade, Ticker,
    TradingPair,
    // Account
    Balance, Trade,
    // Trading
    CreatedOrder, Order, OrderRequest,
};
