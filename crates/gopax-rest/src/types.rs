//! Types for GOPAX REST API requests and responses
//!
//! Every response type here is the decoder for one endpoint family. A body
//! that decodes is guaranteed to have the documented shape: numbers where
//! numbers belong, `buy`/`sell` sides, `BASE-QUOTE` pair names and
//! exchange-format timestamps.

use gopax_types::{number, OrderStatus, OrderType, PairName, Side, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Market Data Types
// ============================================================================

/// Listed asset
///
/// Only `id` is part of the contract; other fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    /// Asset code, e.g. "KRW"
    pub id: String,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Listed trading pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradingPair {
    /// Pair name, e.g. "BTC-KRW"
    pub name: String,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Ticker for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Last trade price
    #[serde(with = "number")]
    pub price: Decimal,
    /// Best ask
    #[serde(with = "number")]
    pub ask: Decimal,
    /// Best bid
    #[serde(with = "number")]
    pub bid: Decimal,
    /// 24h volume
    #[serde(with = "number")]
    pub volume: Decimal,
    /// Snapshot time
    pub time: Timestamp,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.ask + self.bid) / Decimal::TWO
    }

    /// Get the spread
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// Wire form of a book row: `[id, price, amount]`
#[derive(Deserialize)]
struct BookRow(
    String,
    #[serde(with = "number")] Decimal,
    #[serde(with = "number")] Decimal,
);

/// One row of an order book side
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "BookRow")]
pub struct BookEntry {
    /// Entry identifier
    pub id: String,
    /// Price
    pub price: Decimal,
    /// Amount resting at this price
    pub amount: Decimal,
}

impl From<BookRow> for BookEntry {
    fn from(BookRow(id, price, amount): BookRow) -> Self {
        Self { id, price, amount }
    }
}

/// Order book snapshot
///
/// `sequence` is present only for truncated (`level=1`/`level=2`) views.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Bid side, best first
    pub bid: Vec<BookEntry>,
    /// Ask side, best first
    pub ask: Vec<BookEntry>,
    /// Book revision of this snapshot
    #[serde(default)]
    pub sequence: Option<u64>,
}

impl OrderBook {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bid.first().map(|e| e.price)
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.ask.first().map(|e| e.price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Public trade on a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct PublicTrade {
    /// Trade time
    pub time: Timestamp,
    /// Trade time as an epoch value
    pub date: i64,
    /// Trade id, increasing over time
    pub id: u64,
    /// Price
    #[serde(with = "number")]
    pub price: Decimal,
    /// Amount
    #[serde(with = "number")]
    pub amount: Decimal,
    /// Taker side
    pub side: Side,
}

/// 24h OHLCV statistics for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct PairStats {
    /// Open price
    #[serde(with = "number")]
    pub open: Decimal,
    /// High price
    #[serde(with = "number")]
    pub high: Decimal,
    /// Low price
    #[serde(with = "number")]
    pub low: Decimal,
    /// Close price
    #[serde(with = "number")]
    pub close: Decimal,
    /// Volume
    #[serde(with = "number")]
    pub volume: Decimal,
    /// Snapshot time
    pub time: Timestamp,
}

/// Entry of `/trading-pairs/stats`
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPairStats {
    /// Pair name
    pub name: String,
    /// Statistics
    #[serde(flatten)]
    pub stats: PairStats,
}

/// Wire form of a candle: `[time, low, high, open, close, volume]`
#[derive(Deserialize)]
struct CandleRow(
    i64,
    #[serde(with = "number")] Decimal,
    #[serde(with = "number")] Decimal,
    #[serde(with = "number")] Decimal,
    #[serde(with = "number")] Decimal,
    #[serde(with = "number")] Decimal,
);

/// OHLCV candle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CandleRow")]
pub struct Candle {
    /// Candle open time (epoch milliseconds)
    pub time: i64,
    /// Low price
    pub low: Decimal,
    /// High price
    pub high: Decimal,
    /// Open price
    pub open: Decimal,
    /// Close price
    pub close: Decimal,
    /// Volume
    pub volume: Decimal,
}

impl From<CandleRow> for Candle {
    fn from(CandleRow(time, low, high, open, close, volume): CandleRow) -> Self {
        Self {
            time,
            low,
            high,
            open,
            close,
            volume,
        }
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one asset
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Asset code
    pub asset: String,
    /// Available to trade or withdraw
    #[serde(with = "number")]
    pub avail: Decimal,
    /// Held by open orders
    #[serde(with = "number")]
    pub hold: Decimal,
    /// Pending withdrawal
    #[serde(with = "number")]
    pub pending_withdrawal: Decimal,
}

impl Balance {
    /// Total owned (available + held + pending withdrawal)
    pub fn total(&self) -> Decimal {
        self.avail + self.hold + self.pending_withdrawal
    }
}

/// Private trade (fill) of the account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Trade id
    pub id: u64,
    /// Order that was filled
    pub order_id: u64,
    /// Base asset amount
    #[serde(with = "number")]
    pub base_amount: Decimal,
    /// Quote asset amount
    #[serde(with = "number")]
    pub quote_amount: Decimal,
    /// Fee charged
    #[serde(with = "number")]
    pub fee: Decimal,
    /// Price
    #[serde(with = "number")]
    pub price: Decimal,
    /// Trade time
    pub timestamp: Timestamp,
    /// Side of the account's order
    pub side: Side,
    /// Pair traded
    pub trading_pair_name: PairName,
}

// ============================================================================
// Order Types
// ============================================================================

/// Order as returned by `/orders` and `/orders/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned id
    pub id: String,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Side
    pub side: Side,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Limit price
    #[serde(with = "number")]
    pub price: Decimal,
    /// Original amount
    #[serde(with = "number")]
    pub amount: Decimal,
    /// Amount not yet filled
    #[serde(with = "number")]
    pub remaining: Decimal,
    /// Pair
    pub trading_pair_name: PairName,
    /// Creation time
    pub created_at: Timestamp,
    /// Last update time
    pub updated_at: Timestamp,
}

impl Order {
    /// Amount filled so far
    pub fn filled(&self) -> Decimal {
        self.amount - self.remaining
    }
}

/// Order as echoed back by `POST /orders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    /// Server-assigned id
    pub id: String,
    /// Side
    pub side: Side,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Limit price
    #[serde(with = "number")]
    pub price: Decimal,
    /// Amount
    #[serde(with = "number")]
    pub amount: Decimal,
    /// Pair
    pub trading_pair_name: PairName,
    /// Creation time
    pub created_at: Timestamp,
}

/// Body of `POST /orders`
///
/// Field order is the wire order: `type, side, price, amount, tradingPairName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Side
    pub side: Side,
    /// Limit price (absent for market orders)
    #[serde(with = "number::option", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Amount
    #[serde(with = "number")]
    pub amount: Decimal,
    /// Pair
    pub trading_pair_name: PairName,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(pair: PairName, side: Side, price: Decimal, amount: Decimal) -> Self {
        Self {
            order_type: OrderType::Limit,
            side,
            price: Some(price),
            amount,
            trading_pair_name: pair,
        }
    }

    /// Create a market order
    pub fn market(pair: PairName, side: Side, amount: Decimal) -> Self {
        Self {
            order_type: OrderType::Market,
            side,
            price: None,
            amount,
            trading_pair_name: pair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_request_wire_form() {
        let pair: PairName = "BTC-KRW".parse().unwrap();
        let request = OrderRequest::limit(pair, Side::Buy, dec!(1000000), dec!(0.001));
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"limit","side":"buy","price":1000000,"amount":0.001,"tradingPairName":"BTC-KRW"}"#
        );
    }

    #[test]
    fn test_market_order_omits_price() {
        let pair: PairName = "ETH-KRW".parse().unwrap();
        let json = serde_json::to_string(&OrderRequest::market(pair, Side::Sell, dec!(2))).unwrap();
        assert_eq!(json, r#"{"type":"market","side":"sell","amount":2,"tradingPairName":"ETH-KRW"}"#);
    }

    #[test]
    fn test_book_entry_from_triplet() {
        let book: OrderBook =
            serde_json::from_str(r#"{"bid":[["1",100.5,0.25]],"ask":[["2",101,1]]}"#).unwrap();
        assert_eq!(book.bid[0].id, "1");
        assert_eq!(book.bid[0].price, dec!(100.5));
        assert_eq!(book.spread(), Some(dec!(0.5)));
        assert!(book.sequence.is_none());
    }

    #[test]
    fn test_book_entry_rejects_wrong_arity() {
        assert!(serde_json::from_str::<BookEntry>(r#"["1",100.5]"#).is_err());
        assert!(serde_json::from_str::<BookEntry>(r#"["1",100.5,1,2]"#).is_err());
        assert!(serde_json::from_str::<BookEntry>(r#"[1,100.5,1]"#).is_err());
    }

    #[test]
    fn test_candle_column_order() {
        let candle: Candle =
            serde_json::from_str("[1521004860000, 9000, 9100, 9050, 9080, 1.5]").unwrap();
        assert_eq!(candle.time, 1_521_004_860_000);
        assert_eq!(candle.low, dec!(9000));
        assert_eq!(candle.high, dec!(9100));
        assert_eq!(candle.open, dec!(9050));
        assert_eq!(candle.close, dec!(9080));
        assert_eq!(candle.volume, dec!(1.5));
    }

    #[test]
    fn test_balance_decode() {
        let balance: Balance = serde_json::from_str(
            r#"{"asset":"KRW","avail":1000,"hold":250.5,"pendingWithdrawal":0}"#,
        )
        .unwrap();
        assert_eq!(balance.asset, "KRW");
        assert_eq!(balance.total(), dec!(1250.5));
    }

    #[test]
    fn test_balance_requires_pending_withdrawal() {
        assert!(serde_json::from_str::<Balance>(r#"{"asset":"KRW","avail":1,"hold":0}"#).is_err());
    }

    #[test]
    fn test_order_decode() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "4521",
                "status": "placed",
                "side": "buy",
                "type": "limit",
                "price": 1000000,
                "amount": 0.001,
                "remaining": 0.001,
                "tradingPairName": "BTC-KRW",
                "createdAt": "2018-03-14T09:01:17.000Z",
                "updatedAt": "2018-03-14T09:01:17.000Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.filled(), Decimal::ZERO);
    }

    #[test]
    fn test_order_rejects_bad_timestamp() {
        let result = serde_json::from_str::<CreatedOrder>(
            r#"{"id":"1","side":"buy","type":"limit","price":1,"amount":1,
                "tradingPairName":"BTC-KRW","createdAt":"2018-03-14T09:01:17Z"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_named_stats_flatten() {
        let stats: NamedPairStats = serde_json::from_str(
            r#"{"name":"BTC-KRW","open":1,"high":2,"low":0.5,"close":1.5,"volume":10,
                "time":"2018-03-14T09:01:17.000Z"}"#,
        )
        .unwrap();
        assert_eq!(stats.name, "BTC-KRW");
        assert_eq!(stats.stats.low, dec!(0.5));
    }
}
