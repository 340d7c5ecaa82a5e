//! Checks against the real exchange
//!
//! Run with `cargo test -p gopax-rest --test live -- --ignored`.
//! The private tests need `GOPAX_API_KEY` and `GOPAX_SECRET`; the order
//! test places (and cancels) a far-from-market BTC-KRW limit buy.

use gopax_auth::now_millis;
use gopax_rest::contract::{
    check_book_depth, check_candle_count, check_exact_rows, check_listing_prefix, check_row_cap,
};
use gopax_rest::{
    BookLevel, CandleQuery, GopaxRestClient, OrderRequest, OrderScenario, TradeWindow,
    TradeWindowProbe, OBSERVED_PRIVATE_TRADES_CAP,
};
use gopax_types::{PairName, Side};
use rust_decimal_macros::dec;

const PAIR: &str = PairName::BTC_KRW;

fn private_client() -> GopaxRestClient {
    GopaxRestClient::from_env().unwrap()
}

#[tokio::test]
#[ignore = "Makes real requests to api.gopax.co.kr"]
async fn live_listings_are_consistent() {
    let client = GopaxRestClient::new();

    let pairs = client.get_trading_pairs().await.unwrap();
    let names: Vec<&str> = pairs.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&PAIR));

    let stats = client.get_all_stats().await.unwrap();
    let stat_names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
    check_listing_prefix("trading-pairs/stats", &stat_names, &names).unwrap();

    let assets = client.get_assets().await.unwrap();
    assert!(assets.iter().any(|a| a.id == "KRW"));
}

#[tokio::test]
#[ignore = "Makes real requests to api.gopax.co.kr"]
async fn live_book_levels() {
    let client = GopaxRestClient::new();

    for level in [BookLevel::Top, BookLevel::Top50, BookLevel::Full] {
        let book = client.get_orderbook(PAIR, level).await.unwrap();
        check_book_depth(&book, level).unwrap();
    }
}

#[tokio::test]
#[ignore = "Makes real requests to api.gopax.co.kr"]
async fn live_public_trade_windowing() {
    let client = GopaxRestClient::new();

    let listing = client
        .get_pair_trades(PAIR, &TradeWindow::new().with_limit(100))
        .await
        .unwrap();
    check_exact_rows("pair-trades", listing.len(), 100).unwrap();

    let ids: Vec<u64> = listing.iter().map(|t| t.id).collect();
    let probe = TradeWindowProbe::from_ids(&ids).unwrap();

    let past = client.get_pair_trades(PAIR, &probe.past_window(TradeWindow::new())).await.unwrap();
    probe.check_past(&past.iter().map(|t| t.id).collect::<Vec<_>>()).unwrap();

    let latest = client.get_pair_trades(PAIR, &probe.latest_window(TradeWindow::new())).await.unwrap();
    probe.check_latest(&latest.iter().map(|t| t.id).collect::<Vec<_>>()).unwrap();
}

#[tokio::test]
#[ignore = "Makes real requests to api.gopax.co.kr"]
async fn live_candles_and_stats() {
    let client = GopaxRestClient::new();

    let query = CandleQuery::last_minutes(now_millis(), 10, 1).unwrap();
    let candles = client.get_candles(PAIR, &query).await.unwrap();
    check_candle_count(&candles, &query).unwrap();

    let stats = client.get_stats(PAIR).await.unwrap();
    assert!(stats.low <= stats.high);

    let ticker = client.get_ticker(PAIR).await.unwrap();
    assert!(ticker.bid <= ticker.ask);
}

#[tokio::test]
#[ignore = "Needs GOPAX_API_KEY and GOPAX_SECRET"]
async fn live_balances_and_trades() {
    let client = private_client();

    let balances = client.get_balances().await.unwrap();
    let krw = client.get_balance("KRW").await.unwrap();
    assert!(balances.iter().any(|b| b.asset == krw.asset));

    let trades = client.get_trades(&TradeWindow::new()).await.unwrap();
    check_row_cap("trades", trades.len(), OBSERVED_PRIVATE_TRADES_CAP).unwrap();

    if trades.len() >= 2 {
        let ids: Vec<u64> = trades.iter().map(|t| t.id).collect();
        let probe = TradeWindowProbe::from_ids(&ids).unwrap();
        let past = client.get_trades(&probe.past_window(TradeWindow::new())).await.unwrap();
        if !past.is_empty() {
            probe.check_past(&past.iter().map(|t| t.id).collect::<Vec<_>>()).unwrap();
        }
    }
}

#[tokio::test]
#[ignore = "Needs GOPAX_API_KEY and GOPAX_SECRET; places and cancels an order"]
async fn live_order_round_trip() {
    let client = private_client();
    let pair: PairName = PAIR.parse().unwrap();
    let request = OrderRequest::limit(pair, Side::Buy, dec!(1000000), dec!(0.001));

    let mut scenario = OrderScenario::place(&client, request).await.unwrap();
    let fetched = scenario.fetch().await.unwrap();
    assert_eq!(fetched.side, Side::Buy);

    let orders = client.get_orders().await.unwrap();
    assert!(orders.iter().any(|o| o.id == scenario.order_id()));

    let cancelled = scenario.cancel().await.unwrap();
    assert!(!cancelled.status.is_resting());
}
