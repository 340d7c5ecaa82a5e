//! Demo: Market Snapshot
//!
//! Showcases: public endpoints, book levels, candles
//!
//! Run: cargo run --bin market_snapshot -- [PAIR]

use chrono::{TimeZone, Utc};
use colored::*;
use gopax_auth::now_millis;
use gopax_rest::{BookLevel, CandleQuery, GopaxRestClient, TradeWindow};
use gopax_types::{PairName, Side};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let pair = std::env::args()
        .nth(1)
        .unwrap_or_else(|| PairName::BTC_KRW.to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", pair).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = GopaxRestClient::new();

    let ticker = client.get_ticker(&pair).await?;
    println!("{}", "TICKER".yellow().bold());
    println!("  Last:   {}", ticker.price);
    println!("  Bid:    {}", ticker.bid.to_string().green());
    println!("  Ask:    {}", ticker.ask.to_string().red());
    println!("  Spread: {}", ticker.spread());
    println!("  Volume: {}", ticker.volume);
    println!("  Time:   {}", ticker.time);
    println!();

    let book = client.get_orderbook(&pair, BookLevel::Top50).await?;
    println!(
        "{} {}",
        "ORDER BOOK".yellow().bold(),
        format!("(sequence {})", book.sequence.unwrap_or_default()).dimmed()
    );
    for (bid, ask) in book.bid.iter().zip(book.ask.iter()).take(5) {
        println!(
            "  {:>14} {:>12}  |  {:<14} {:<12}",
            bid.amount.to_string().green(),
            bid.price.to_string().green(),
            ask.price.to_string().red(),
            ask.amount.to_string().red()
        );
    }
    println!();

    let stats = client.get_stats(&pair).await?;
    println!("{}", "24H STATS".yellow().bold());
    println!(
        "  O {}  H {}  L {}  C {}  V {}",
        stats.open, stats.high, stats.low, stats.close, stats.volume
    );
    println!();

    let trades = client.get_pair_trades(&pair, &TradeWindow::new().with_limit(5)).await?;
    println!("{}", "RECENT TRADES".yellow().bold());
    for trade in &trades {
        let side = match trade.side {
            Side::Buy => "BUY ".green(),
            Side::Sell => "SELL".red(),
        };
        println!("  #{:<10} {} {} @ {}", trade.id, side, trade.amount, trade.price);
    }
    println!();

    let query = CandleQuery::last_minutes(now_millis(), 10, 1)?;
    let candles = client.get_candles(&pair, &query).await?;
    println!(
        "{} {}",
        "1M CANDLES".yellow().bold(),
        format!("({} of {} expected)", candles.len(), query.expected_count()).dimmed()
    );
    for candle in &candles {
        let time = Utc
            .timestamp_millis_opt(candle.time)
            .single()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| candle.time.to_string());
        let close = if candle.close >= candle.open {
            candle.close.to_string().green()
        } else {
            candle.close.to_string().red()
        };
        println!("  {}  O {}  H {}  L {}  C {}", time, candle.open, candle.high, candle.low, close);
    }

    Ok(())
}
