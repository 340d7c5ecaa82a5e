//! API endpoint implementations
//!
//! [`Endpoint`] is the contract table: method, path template, whether the
//! call is signed, and which query keys it accepts. The endpoint groups
//! below are typed wrappers over it.

pub mod market;
pub mod account;
pub mod trading;

pub use market::MarketEndpoints;
pub use account::AccountEndpoints;
pub use trading::TradingEndpoints;

use gopax_types::PairName;
use reqwest::Method;

use crate::error::{RestError, RestResult};

const WINDOW_PARAMS: &[&str] = &["limit", "pastmax", "latestmin", "after", "before"];

/// One row of the endpoint surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /assets`
    Assets,
    /// `GET /trading-pairs`
    TradingPairs,
    /// `GET /trading-pairs/{pair}/ticker`
    Ticker(&'a PairName),
    /// `GET /trading-pairs/{pair}/book`
    Book(&'a PairName),
    /// `GET /trading-pairs/{pair}/trades`
    PairTrades(&'a PairName),
    /// `GET /trading-pairs/{pair}/stats`
    PairStats(&'a PairName),
    /// `GET /trading-pairs/{pair}/candles`
    Candles(&'a PairName),
    /// `GET /trading-pairs/stats`
    AllPairStats,
    /// `GET /balances`
    Balances,
    /// `GET /balances/{asset}`
    Balance(&'a str),
    /// `POST /orders`
    PlaceOrder,
    /// `GET /orders`
    Orders,
    /// `GET /orders/{id}`
    Order(&'a str),
    /// `DELETE /orders/{id}`
    CancelOrder(&'a str),
    /// `GET /trades`
    Trades,
}

impl Endpoint<'_> {
    /// HTTP method
    pub fn method(&self) -> Method {
        match self {
            Self::PlaceOrder => Method::POST,
            Self::CancelOrder(_) => Method::DELETE,
            _ => Method::GET,
        }
    }

    /// Request path, without query string
    pub fn path(&self) -> String {
        match self {
            Self::Assets => "/assets".to_string(),
            Self::TradingPairs => "/trading-pairs".to_string(),
            Self::Ticker(pair) => format!("/trading-pairs/{}/ticker", pair),
            Self::Book(pair) => format!("/trading-pairs/{}/book", pair),
            Self::PairTrades(pair) => format!("/trading-pairs/{}/trades", pair),
            Self::PairStats(pair) => format!("/trading-pairs/{}/stats", pair),
            Self::Candles(pair) => format!("/trading-pairs/{}/candles", pair),
            Self::AllPairStats => "/trading-pairs/stats".to_string(),
            Self::Balances => "/balances".to_string(),
            Self::Balance(asset) => format!("/balances/{}", asset),
            Self::PlaceOrder | Self::Orders => "/orders".to_string(),
            Self::Order(id) | Self::CancelOrder(id) => format!("/orders/{}", id),
            Self::Trades => "/trades".to_string(),
        }
    }

    /// Short name used in logs and decode errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::TradingPairs => "trading-pairs",
            Self::Ticker(_) => "ticker",
            Self::Book(_) => "book",
            Self::PairTrades(_) => "pair-trades",
            Self::PairStats(_) => "pair-stats",
            Self::Candles(_) => "candles",
            Self::AllPairStats => "all-pair-stats",
            Self::Balances => "balances",
            Self::Balance(_) => "balance",
            Self::PlaceOrder => "place-order",
            Self::Orders => "orders",
            Self::Order(_) => "order",
            Self::CancelOrder(_) => "cancel-order",
            Self::Trades => "trades",
        }
    }

    /// True for endpoints that need a signed request
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Balances
                | Self::Balance(_)
                | Self::PlaceOrder
                | Self::Orders
                | Self::Order(_)
                | Self::CancelOrder(_)
                | Self::Trades
        )
    }

    /// Query keys the endpoint accepts
    pub fn query_params(&self) -> &'static [&'static str] {
        match self {
            Self::Book(_) => &["level"],
            Self::PairTrades(_) | Self::Trades => WINDOW_PARAMS,
            Self::Candles(_) => &["start", "end", "interval"],
            _ => &[],
        }
    }

    /// Path plus encoded query, rejecting keys the endpoint does not take
    pub fn path_and_query(&self, query: &[(&'static str, String)]) -> RestResult<String> {
        let accepted = self.query_params();
        if let Some((key, _)) = query.iter().find(|(key, _)| !accepted.contains(key)) {
            return Err(RestError::InvalidParameter(format!(
                "{} does not accept query parameter {:?}",
                self.name(),
                key
            )));
        }

        let path = self.path();
        if query.is_empty() {
            return Ok(path);
        }

        let encoded = serde_urlencoded::to_string(query)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        Ok(format!("{}?{}", path, encoded))
    }
}

/// Validate an asset code or order id before it becomes a path segment
pub(crate) fn path_segment<'a>(what: &str, value: &'a str) -> RestResult<&'a str> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RestError::InvalidParameter(format!("invalid {}: {:?}", what, value)));
    }
    Ok(value)
}

/// Parse a trading pair name given as a string
pub(crate) fn pair_name(pair: &str) -> RestResult<PairName> {
    pair.parse()
        .map_err(|e: gopax_types::TypeError| RestError::InvalidParameter(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_table() {
        let pair: PairName = "BTC-KRW".parse().unwrap();

        assert_eq!(Endpoint::Book(&pair).path(), "/trading-pairs/BTC-KRW/book");
        assert_eq!(Endpoint::AllPairStats.path(), "/trading-pairs/stats");
        assert_eq!(Endpoint::CancelOrder("12345").method(), Method::DELETE);
        assert_eq!(Endpoint::PlaceOrder.method(), Method::POST);
        assert_eq!(Endpoint::Order("12345").method(), Method::GET);

        assert!(!Endpoint::Ticker(&pair).requires_auth());
        assert!(Endpoint::Trades.requires_auth());
        assert!(Endpoint::Balance("KRW").requires_auth());
    }

    #[test]
    fn test_path_and_query() {
        let pair: PairName = "ETH-KRW".parse().unwrap();
        let query = vec![("pastmax", "10".to_string()), ("limit", "5".to_string())];

        assert_eq!(
            Endpoint::PairTrades(&pair).path_and_query(&query).unwrap(),
            "/trading-pairs/ETH-KRW/trades?pastmax=10&limit=5"
        );
        assert_eq!(Endpoint::Assets.path_and_query(&[]).unwrap(), "/assets");
    }

    #[test]
    fn test_unknown_query_key_rejected() {
        let query = vec![("level", "1".to_string())];
        let err = Endpoint::Trades.path_and_query(&query).unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(_)));
        assert!(err.is_local());
    }

    #[test]
    fn test_path_segment_validation() {
        assert!(path_segment("asset", "KRW").is_ok());
        assert!(path_segment("order id", "").is_err());
        assert!(path_segment("order id", "12/../34").is_err());
        assert!(pair_name("BTCKRW").is_err());
    }
}
