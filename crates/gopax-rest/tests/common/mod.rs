//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use gopax_auth::MonotonicNonce;
use gopax_rest::{ClientConfig, Credentials, GopaxRestClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "61c3c6c3-2410-4e11-a6e1-8d2f3d2b8f5e";
/// Base64 of "key"
pub const SECRET: &str = "a2V5";
pub const TIME: &str = "2018-03-14T09:01:17.000Z";

/// Asset ids in listing order
pub const ASSETS: &[&str] = &["KRW", "ETH", "BTC", "BCH", "ETC"];
/// Trading pair names in listing order
pub const TRADING_PAIRS: &[&str] = &["ETH-KRW", "BTC-KRW", "BCH-KRW", "ETC-KRW"];

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, SECRET).unwrap()
}

/// Public client pointed at `server`
pub fn public_client(server: &MockServer) -> GopaxRestClient {
    GopaxRestClient::with_config(ClientConfig::new().with_base_url(server.uri()))
}

/// Authenticated client pointed at `server`
pub fn private_client(server: &MockServer) -> GopaxRestClient {
    GopaxRestClient::with_config(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_credentials(credentials())
            .with_nonce_source(Arc::new(MonotonicNonce::new())),
    )
}

pub fn assets() -> Value {
    Value::Array(
        ASSETS
            .iter()
            .map(|id| json!({ "id": id, "name": format!("{} asset", id) }))
            .collect(),
    )
}

pub fn trading_pairs() -> Value {
    Value::Array(
        TRADING_PAIRS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let (base, quote) = name.split_once('-').unwrap();
                json!({ "id": i + 1, "name": name, "baseAsset": base, "quoteAsset": quote })
            })
            .collect(),
    )
}

pub fn ticker() -> Value {
    json!({ "price": 10250000, "ask": 10251000, "bid": 10249000, "volume": 164.8216, "time": TIME })
}

/// Book with `rows` entries per side
pub fn book(rows: usize, sequence: Option<u64>) -> Value {
    let side = |start: i64, step: i64| -> Vec<Value> {
        (0..rows as i64)
            .map(|i| json!([format!("{}", 1000 + i), start + i * step, 0.5]))
            .collect()
    };
    let mut book = json!({ "bid": side(10249000, -1000), "ask": side(10251000, 1000) });
    if let Some(sequence) = sequence {
        book["sequence"] = json!(sequence);
    }
    book
}

/// Public trades with ids `top, top-1, ...`
pub fn public_trades(top: u64, count: usize) -> Value {
    Value::Array(
        (0..count as u64)
            .map(|i| {
                json!({
                    "time": TIME,
                    "date": 1521018077,
                    "id": top - i,
                    "price": 10250000,
                    "amount": 0.01,
                    "side": if i % 2 == 0 { "buy" } else { "sell" }
                })
            })
            .collect(),
    )
}

pub fn pair_stats() -> Value {
    json!({ "open": 10100000, "high": 10300000, "low": 10000000, "close": 10250000,
            "volume": 164.8216, "time": TIME })
}

pub fn all_pair_stats() -> Value {
    Value::Array(
        TRADING_PAIRS
            .iter()
            .map(|name| {
                let mut stats = pair_stats();
                stats["name"] = json!(name);
                stats
            })
            .collect(),
    )
}

/// `count` one-minute candles starting at `start`
pub fn candles(start: u64, count: usize) -> Value {
    Value::Array(
        (0..count as u64)
            .map(|i| json!([start + i * 60_000, 10000000, 10300000, 10100000, 10250000, 1.5]))
            .collect(),
    )
}

pub fn balance(asset: &str) -> Value {
    json!({ "asset": asset, "avail": 1000000, "hold": 10000, "pendingWithdrawal": 0 })
}

pub fn balances() -> Value {
    Value::Array(ASSETS.iter().map(|asset| balance(asset)).collect())
}

/// Private trades with ids `top, top-1, ...`
pub fn private_trades(top: u64, count: usize) -> Value {
    Value::Array(
        (0..count as u64)
            .map(|i| {
                json!({
                    "id": top - i,
                    "orderId": 4000 + top - i,
                    "baseAmount": 0.001,
                    "quoteAmount": 10250,
                    "fee": 0.0025,
                    "price": 10250000,
                    "timestamp": TIME,
                    "side": "buy",
                    "tradingPairName": "BTC-KRW"
                })
            })
            .collect(),
    )
}

pub fn created_order(id: &str) -> Value {
    json!({
        "id": id,
        "side": "buy",
        "type": "limit",
        "price": 1000000,
        "amount": 0.001,
        "tradingPairName": "BTC-KRW",
        "createdAt": TIME
    })
}

pub fn order(id: &str, status: &str, remaining: f64) -> Value {
    json!({
        "id": id,
        "status": status,
        "side": "buy",
        "type": "limit",
        "price": 1000000,
        "amount": 0.001,
        "remaining": remaining,
        "tradingPairName": "BTC-KRW",
        "createdAt": TIME,
        "updatedAt": "2018-03-14T09:01:18.000Z"
    })
}
