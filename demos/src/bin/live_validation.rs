//! Live Validation Suite for the GOPAX REST client
//!
//! Runs every endpoint contract against the REAL exchange. Private checks
//! run only when `GOPAX_API_KEY` and `GOPAX_SECRET` are set; the order
//! checks place one far-from-market limit buy and cancel it.
//!
//! Run with:
//! ```bash
//! cargo run --bin live_validation
//! ```

use gopax_auth::now_millis;
use gopax_rest::contract::{
    check_book_depth, check_candle_count, check_exact_rows, check_listing_prefix, check_row_cap,
};
use gopax_rest::{
    BookLevel, CandleQuery, GopaxRestClient, OrderRequest, OrderScenario, RestResult,
    TradeWindow, TradeWindowProbe, OBSERVED_PRIVATE_TRADES_CAP,
};
use gopax_types::{PairName, Side};
use rust_decimal_macros::dec;
use std::time::{Duration, Instant};

const PAIR: &str = PairName::BTC_KRW;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct TestResult {
    category: &'static str,
    name: &'static str,
    passed: bool,
    message: String,
    duration: Duration,
}

struct TestRunner {
    results: Vec<TestResult>,
}

impl TestRunner {
    fn new() -> Self {
        Self { results: Vec::new() }
    }

    fn record(&mut self, category: &'static str, name: &'static str, passed: bool, message: String, duration: Duration) {
        let status = if passed { "\x1b[32mPASS\x1b[0m" } else { "\x1b[31mFAIL\x1b[0m" };
        let duration_str = if duration.as_secs() > 0 {
            format!("{:.1}s", duration.as_secs_f64())
        } else {
            format!("{}ms", duration.as_millis())
        };

        println!(
            "[{:2}] {}: {} {:.<40} {} ({})",
            self.results.len() + 1,
            category,
            name,
            "",
            status,
            duration_str
        );

        self.results.push(TestResult {
            category,
            name,
            passed,
            message,
            duration,
        });
    }

    /// Record the outcome of a check that produced a summary line
    fn check<T: std::fmt::Display, E: std::fmt::Display>(
        &mut self,
        category: &'static str,
        name: &'static str,
        start: Instant,
        outcome: Result<T, E>,
    ) -> bool {
        match outcome {
            Ok(detail) => {
                self.record(category, name, true, detail.to_string(), start.elapsed());
                true
            }
            Err(e) => {
                self.record(category, name, false, e.to_string(), start.elapsed());
                false
            }
        }
    }

    fn skip(&mut self, category: &'static str, name: &'static str, reason: &str) {
        println!("[--] {}: {} {:.<40} \x1b[33mSKIP\x1b[0m ({})", category, name, "", reason);
    }

    fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    fn print_summary(&self) {
        let passed = self.results.iter().filter(|r| r.passed).count();
        let failed = self.failed();
        let total_duration: Duration = self.results.iter().map(|r| r.duration).sum();

        println!();
        println!("══════════════════════════════════════════════════════════════");
        println!("                         SUMMARY");
        println!("══════════════════════════════════════════════════════════════");
        println!("Total:    {} checks", self.results.len());
        println!("Passed:   \x1b[32m{}\x1b[0m", passed);
        println!("Failed:   \x1b[31m{}\x1b[0m", failed);
        println!("Duration: {:.1}s", total_duration.as_secs_f64());
        println!();

        if failed > 0 {
            println!("\x1b[31mFAILED CHECKS:\x1b[0m");
            for result in &self.results {
                if !result.passed {
                    println!("  - [{}] {}: {}", result.category, result.name, result.message);
                }
            }
            println!();
        }

        println!("══════════════════════════════════════════════════════════════");

        if failed == 0 {
            println!("\x1b[32m✓ ALL CHECKS PASSED - API CONTRACT HOLDS\x1b[0m");
        }
    }
}

fn ids<T>(rows: &[T], id: impl Fn(&T) -> u64) -> Vec<u64> {
    rows.iter().map(id).collect()
}

// ============================================================================
// Check Categories
// ============================================================================

async fn check_listings(runner: &mut TestRunner, client: &GopaxRestClient) {
    println!("\n--- LISTING CHECKS ---\n");

    let start = Instant::now();
    let outcome = client.get_assets().await.map(|assets| format!("{} assets", assets.len()));
    runner.check("LISTING", "Assets decode", start, outcome);

    let start = Instant::now();
    let pairs = client.get_trading_pairs().await;
    let names: Vec<String> = pairs
        .as_ref()
        .map(|pairs| pairs.iter().map(|p| p.name.clone()).collect())
        .unwrap_or_default();
    runner.check("LISTING", "Trading pairs decode", start, pairs.map(|p| format!("{} pairs", p.len())));

    let start = Instant::now();
    let outcome: RestResult<String> = async {
        let stats = client.get_all_stats().await?;
        let stat_names: Vec<String> = stats.into_iter().map(|s| s.name).collect();
        check_listing_prefix("trading-pairs/stats", &stat_names, &names)?;
        Ok(format!("{} pairs in listing order", stat_names.len()))
    }
    .await;
    runner.check("LISTING", "Stats follow pair order", start, outcome);
}

async fn check_market(runner: &mut TestRunner, client: &GopaxRestClient) {
    println!("\n--- MARKET DATA CHECKS ---\n");

    let start = Instant::now();
    let outcome = client
        .get_ticker(PAIR)
        .await
        .map(|t| format!("bid={} ask={} time={}", t.bid, t.ask, t.time));
    runner.check("MARKET", "Ticker", start, outcome);

    for (name, level) in [
        ("Book level 1", BookLevel::Top),
        ("Book level 2", BookLevel::Top50),
        ("Full book", BookLevel::Full),
    ] {
        let start = Instant::now();
        let outcome: RestResult<String> = async {
            let book = client.get_orderbook(PAIR, level).await?;
            check_book_depth(&book, level)?;
            Ok(format!("{}x{} rows, sequence={:?}", book.bid.len(), book.ask.len(), book.sequence))
        }
        .await;
        runner.check("MARKET", name, start, outcome);
    }

    let start = Instant::now();
    let outcome = client
        .get_stats(PAIR)
        .await
        .map(|s| format!("O={} C={}", s.open, s.close));
    runner.check("MARKET", "Pair stats", start, outcome);

    let start = Instant::now();
    let outcome: RestResult<String> = async {
        let query = CandleQuery::last_minutes(now_millis(), 10, 1)?;
        let candles = client.get_candles(PAIR, &query).await?;
        check_candle_count(&candles, &query)?;
        Ok(format!("{} candles", candles.len()))
    }
    .await;
    runner.check("MARKET", "Candle count", start, outcome);
}

async fn check_public_trades(runner: &mut TestRunner, client: &GopaxRestClient) {
    println!("\n--- PUBLIC TRADE WINDOW CHECKS ---\n");

    let start = Instant::now();
    let probe: RestResult<TradeWindowProbe> = async {
        let listing = client
            .get_pair_trades(PAIR, &TradeWindow::new().with_limit(100))
            .await?;
        check_exact_rows("pair-trades", listing.len(), 100)?;
        Ok(TradeWindowProbe::from_ids(&ids(&listing, |t| t.id))?)
    }
    .await;
    let probe = match probe {
        Ok(probe) => {
            runner.check::<_, String>("TRADES", "limit=100", start, Ok(format!("pastmax={}", probe.pastmax())));
            probe
        }
        Err(e) => {
            runner.check::<String, _>("TRADES", "limit=100", start, Err(e));
            return;
        }
    };

    let start = Instant::now();
    let outcome: RestResult<String> = async {
        let rows = client.get_pair_trades(PAIR, &probe.past_window(TradeWindow::new())).await?;
        probe.check_past(&ids(&rows, |t| t.id))?;
        Ok(format!("first id {:?}", rows.first().map(|t| t.id)))
    }
    .await;
    runner.check("TRADES", "pastmax", start, outcome);

    let start = Instant::now();
    let outcome: RestResult<String> = async {
        let rows = client.get_pair_trades(PAIR, &probe.latest_window(TradeWindow::new())).await?;
        probe.check_latest(&ids(&rows, |t| t.id))?;
        Ok(format!("first id {:?}", rows.first().map(|t| t.id)))
    }
    .await;
    runner.check("TRADES", "latestmin", start, outcome);
}

async fn check_account(runner: &mut TestRunner, client: &GopaxRestClient) {
    println!("\n--- ACCOUNT CHECKS ---\n");

    let start = Instant::now();
    let outcome = client
        .get_balances()
        .await
        .map(|b| format!("{} balances", b.len()));
    runner.check("ACCOUNT", "Balances", start, outcome);

    let start = Instant::now();
    let outcome = client
        .get_balance("KRW")
        .await
        .map(|b| format!("avail={} hold={}", b.avail, b.hold));
    runner.check("ACCOUNT", "KRW balance", start, outcome);

    let start = Instant::now();
    let outcome: RestResult<String> = async {
        let trades = client.get_trades(&TradeWindow::new()).await?;
        check_row_cap("trades", trades.len(), OBSERVED_PRIVATE_TRADES_CAP)?;
        Ok(format!("{} trades", trades.len()))
    }
    .await;
    runner.check("ACCOUNT", "Private trades cap", start, outcome);
}

async fn check_orders(runner: &mut TestRunner, client: &GopaxRestClient) {
    println!("\n--- ORDER LIFECYCLE CHECKS ---\n");

    let start = Instant::now();
    let pair: PairName = match PAIR.parse() {
        Ok(pair) => pair,
        Err(e) => {
            runner.check::<String, _>("ORDER", "Place limit buy", start, Err(e));
            return;
        }
    };
    let request = OrderRequest::limit(pair, Side::Buy, dec!(1000000), dec!(0.001));
    let mut scenario = match OrderScenario::place(client, request).await {
        Ok(scenario) => {
            let detail = format!("id={}", scenario.order_id());
            runner.check::<_, String>("ORDER", "Place limit buy", start, Ok(detail));
            scenario
        }
        Err(e) => {
            runner.check::<String, _>("ORDER", "Place limit buy", start, Err(e));
            return;
        }
    };

    let start = Instant::now();
    let outcome = scenario
        .fetch()
        .await
        .map(|o| format!("status={} side={}", o.status, o.side));
    runner.check("ORDER", "Fetch by id", start, outcome);

    let start = Instant::now();
    let order_id = scenario.order_id().to_string();
    let outcome = client.get_orders().await.map(|orders| {
        let listed = orders.iter().any(|o| o.id == order_id);
        format!("{} orders, placed order listed: {}", orders.len(), listed)
    });
    runner.check("ORDER", "List orders", start, outcome);

    let start = Instant::now();
    let outcome = scenario
        .cancel()
        .await
        .map(|o| format!("status after cancel: {}", o.status));
    runner.check("ORDER", "Cancel", start, outcome);
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           GOPAX REST LIVE VALIDATION SUITE                   ║");
    println!("║                                                              ║");
    println!("║  Checking contracts against the REAL GOPAX REST API          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut runner = TestRunner::new();

    let client = match GopaxRestClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Cannot build client: {}", e);
            std::process::exit(2);
        }
    };

    check_listings(&mut runner, &client).await;
    check_market(&mut runner, &client).await;
    check_public_trades(&mut runner, &client).await;

    if client.has_credentials() {
        check_account(&mut runner, &client).await;
        check_orders(&mut runner, &client).await;
    } else {
        println!();
        runner.skip("ACCOUNT", "Private checks", "GOPAX_API_KEY / GOPAX_SECRET not set");
    }

    runner.print_summary();

    if runner.failed() > 0 {
        std::process::exit(1);
    }
}
