//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::endpoints::{pair_name, Endpoint};
use crate::error::RestResult;
use crate::query::{BookLevel, CandleQuery, TradeWindow};
use crate::transport::Transport;
use crate::types::{Asset, Candle, NamedPairStats, OrderBook, PairStats, PublicTrade, Ticker, TradingPair};
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get listed assets
    #[instrument(skip(self))]
    pub async fn get_assets(&self) -> RestResult<Vec<Asset>> {
        debug!("Fetching assets");
        self.transport.get_public(Endpoint::Assets, &[]).await
    }

    /// Get listed trading pairs
    #[instrument(skip(self))]
    pub async fn get_trading_pairs(&self) -> RestResult<Vec<TradingPair>> {
        debug!("Fetching trading pairs");
        self.transport.get_public(Endpoint::TradingPairs, &[]).await
    }

    /// Get ticker information
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "BTC-KRW")
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pair: &str) -> RestResult<Ticker> {
        let pair = pair_name(pair)?;
        debug!("Fetching ticker for {}", pair);
        self.transport.get_public(Endpoint::Ticker(&pair), &[]).await
    }

    /// Get orderbook depth
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "BTC-KRW")
    /// * `level` - Full depth, top of book, or top 50 rows per side
    #[instrument(skip(self))]
    pub async fn get_orderbook(&self, pair: &str, level: BookLevel) -> RestResult<OrderBook> {
        let pair = pair_name(pair)?;
        debug!("Fetching {:?} orderbook for {}", level, pair);
        self.transport
            .get_public(Endpoint::Book(&pair), &level.to_query())
            .await
    }

    /// Get recent public trades, most recent first
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `window` - Row limit and id/time filters
    #[instrument(skip(self))]
    pub async fn get_trades(&self, pair: &str, window: &TradeWindow) -> RestResult<Vec<PublicTrade>> {
        let pair = pair_name(pair)?;
        debug!("Fetching trades for {}", pair);
        self.transport
            .get_public(Endpoint::PairTrades(&pair), &window.to_query())
            .await
    }

    /// Get 24h statistics for a trading pair
    #[instrument(skip(self))]
    pub async fn get_stats(&self, pair: &str) -> RestResult<PairStats> {
        let pair = pair_name(pair)?;
        debug!("Fetching stats for {}", pair);
        self.transport.get_public(Endpoint::PairStats(&pair), &[]).await
    }

    /// Get OHLCV candles
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `query` - Window and interval
    #[instrument(skip(self))]
    pub async fn get_candles(&self, pair: &str, query: &CandleQuery) -> RestResult<Vec<Candle>> {
        let pair = pair_name(pair)?;
        debug!(
            "Fetching {}m candles for {} ({} expected)",
            query.interval(),
            pair,
            query.expected_count()
        );
        self.transport
            .get_public(Endpoint::Candles(&pair), &query.to_query())
            .await
    }

    /// Get 24h statistics for every pair, in `/trading-pairs` order
    #[instrument(skip(self))]
    pub async fn get_all_stats(&self) -> RestResult<Vec<NamedPairStats>> {
        debug!("Fetching stats for all pairs");
        self.transport.get_public(Endpoint::AllPairStats, &[]).await
    }
}
