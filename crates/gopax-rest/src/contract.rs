//! Semantic checks on decoded responses
//!
//! Decoding (see [`crate::types`]) guarantees shape. The functions here check
//! the rules that hold *between* values: listing order against reference
//! data, depth truncation, windowing bounds, order echo and the order
//! lifecycle.

use gopax_types::{Decimal, OrderStatus};

use crate::query::{BookLevel, CandleQuery};
use crate::types::{Candle, CreatedOrder, Order, OrderBook, OrderRequest};

/// Rows returned by an unfiltered private `/trades` listing
///
/// The `limit` parameter does not change this.
pub const OBSERVED_PRIVATE_TRADES_CAP: usize = 100;

/// A decoded response that breaks a contract rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// Listing differs from the reference at `index`
    #[error("{listing}[{index}]: expected {expected:?}, got {actual:?}")]
    ListingMismatch {
        /// Listing name
        listing: &'static str,
        /// First differing position
        index: usize,
        /// Reference value
        expected: String,
        /// Value received
        actual: String,
    },

    /// Listing is shorter or longer than required
    #[error("{listing}: expected {expected} rows, got {actual}")]
    RowCount {
        /// Listing name
        listing: &'static str,
        /// Required row count
        expected: usize,
        /// Rows received
        actual: usize,
    },

    /// Listing has more rows than its cap
    #[error("{listing}: at most {cap} rows allowed, got {actual}")]
    RowCap {
        /// Listing name
        listing: &'static str,
        /// Row cap
        cap: usize,
        /// Rows received
        actual: usize,
    },

    /// Listing is not most-recent-first
    #[error("{listing}[{index}]: id {id} does not follow {previous} in descending order")]
    Ordering {
        /// Listing name
        listing: &'static str,
        /// Position of the offending row
        index: usize,
        /// Id of the row before it
        previous: u64,
        /// Id of the offending row
        id: u64,
    },

    /// Listing needed at least one row
    #[error("{0}: listing is empty")]
    Empty(&'static str),

    /// Truncated book without `sequence`
    #[error("order book at {0:?} has no sequence")]
    MissingSequence(BookLevel),

    /// Full book with `sequence`
    #[error("full order book carries sequence {0}")]
    UnexpectedSequence(u64),

    /// Id filter not honoured
    #[error("{filter}={bound} returned id {id} first")]
    Window {
        /// `pastmax` or `latestmin`
        filter: &'static str,
        /// Bound sent
        bound: u64,
        /// First id received
        id: u64,
    },

    /// Response field differs from what was requested
    #[error("{field}: expected {expected}, got {actual}")]
    Echo {
        /// Field name
        field: &'static str,
        /// Requested value
        expected: String,
        /// Value received
        actual: String,
    },

    /// `remaining` outside `0..=amount`, or non-zero on a filled order
    #[error("order {id}: remaining {remaining} invalid for amount {amount} in status {status}")]
    Remaining {
        /// Order id
        id: String,
        /// Status
        status: String,
        /// Remaining amount
        remaining: Decimal,
        /// Original amount
        amount: Decimal,
    },

    /// Status change the lifecycle does not allow
    #[error("order {id}: {from} cannot become {to}")]
    Transition {
        /// Order id
        id: String,
        /// Earlier status
        from: String,
        /// Later status
        to: String,
    },

    /// `remaining` went up between two reads
    #[error("order {id}: remaining grew from {before} to {after}")]
    RemainingGrew {
        /// Order id
        id: String,
        /// Earlier remaining
        before: Decimal,
        /// Later remaining
        after: Decimal,
    },

    /// Order still on the book after a successful cancel
    #[error("order {id} still resting as {status} after cancel")]
    StillResting {
        /// Order id
        id: String,
        /// Status string as received
        status: String,
    },

    /// Cancel answered with content
    #[error("cancel returned a body: {0}")]
    CancelBody(String),
}

/// Result of a contract check
pub type ContractResult = Result<(), ContractViolation>;

/// Check a listing against a reference, element by element and in order
pub fn check_listing_equals<S: AsRef<str>>(
    listing: &'static str,
    actual: &[S],
    reference: &[S],
) -> ContractResult {
    check_listing_prefix(listing, actual, reference)?;
    if actual.len() != reference.len() {
        return Err(ContractViolation::RowCount {
            listing,
            expected: reference.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}

/// Check that `actual` starts with every element of `reference`, in order
///
/// Extra trailing rows are allowed (e.g. assets listed after the fixture was
/// captured).
pub fn check_listing_prefix<S: AsRef<str>>(
    listing: &'static str,
    actual: &[S],
    reference: &[S],
) -> ContractResult {
    for (index, expected) in reference.iter().enumerate() {
        let Some(got) = actual.get(index) else {
            return Err(ContractViolation::RowCount {
                listing,
                expected: reference.len(),
                actual: actual.len(),
            });
        };
        if got.as_ref() != expected.as_ref() {
            return Err(ContractViolation::ListingMismatch {
                listing,
                index,
                expected: expected.as_ref().to_string(),
                actual: got.as_ref().to_string(),
            });
        }
    }
    Ok(())
}

/// Check depth truncation and the presence of `sequence`
pub fn check_book_depth(book: &OrderBook, level: BookLevel) -> ContractResult {
    match (level.rows(), book.sequence) {
        (None, Some(sequence)) => Err(ContractViolation::UnexpectedSequence(sequence)),
        (None, None) => Ok(()),
        (Some(_), None) => Err(ContractViolation::MissingSequence(level)),
        (Some(rows), Some(_)) => {
            check_exact_rows("book.bid", book.bid.len(), rows)?;
            check_exact_rows("book.ask", book.ask.len(), rows)
        }
    }
}

/// Check the number of candles returned for `query`
pub fn check_candle_count(candles: &[Candle], query: &CandleQuery) -> ContractResult {
    check_exact_rows("candles", candles.len(), query.expected_count())
}

/// Check a listing has exactly `expected` rows
pub fn check_exact_rows(listing: &'static str, actual: usize, expected: usize) -> ContractResult {
    if actual != expected {
        return Err(ContractViolation::RowCount { listing, expected, actual });
    }
    Ok(())
}

/// Check a listing has at most `cap` rows
pub fn check_row_cap(listing: &'static str, actual: usize, cap: usize) -> ContractResult {
    if actual > cap {
        return Err(ContractViolation::RowCap { listing, cap, actual });
    }
    Ok(())
}

/// Check ids strictly decrease, so the first row is the newest
pub fn check_descending_ids(listing: &'static str, ids: &[u64]) -> ContractResult {
    for (index, pair) in ids.windows(2).enumerate() {
        if pair[1] >= pair[0] {
            return Err(ContractViolation::Ordering {
                listing,
                index: index + 1,
                previous: pair[0],
                id: pair[1],
            });
        }
    }
    Ok(())
}

/// Check the first id of a `pastmax` query is strictly below the bound
pub fn check_pastmax(ids: &[u64], pastmax: u64) -> ContractResult {
    let first = *ids.first().ok_or(ContractViolation::Empty("pastmax"))?;
    if first >= pastmax {
        return Err(ContractViolation::Window { filter: "pastmax", bound: pastmax, id: first });
    }
    Ok(())
}

/// Check the first id of a `latestmin` query is strictly above the bound
pub fn check_latestmin(ids: &[u64], latestmin: u64) -> ContractResult {
    let first = *ids.first().ok_or(ContractViolation::Empty("latestmin"))?;
    if first <= latestmin {
        return Err(ContractViolation::Window { filter: "latestmin", bound: latestmin, id: first });
    }
    Ok(())
}

fn echo<T: PartialEq + ToString>(field: &'static str, expected: &T, actual: &T) -> ContractResult {
    if expected != actual {
        return Err(ContractViolation::Echo {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check a created order echoes the request
///
/// `createdAt` is validated by decoding.
pub fn check_order_echo(created: &CreatedOrder, request: &OrderRequest) -> ContractResult {
    if let Some(price) = request.price {
        echo("price", &price, &created.price)?;
    }
    echo("amount", &request.amount, &created.amount)?;
    echo("tradingPairName", &request.trading_pair_name, &created.trading_pair_name)?;
    echo("side", &request.side, &created.side)?;
    echo("type", &request.order_type, &created.order_type)
}

/// Check a fetched order matches the order that was placed
pub fn check_order_matches(order: &Order, created: &CreatedOrder) -> ContractResult {
    echo("id", &created.id, &order.id)?;
    echo("side", &created.side, &order.side)?;
    echo("type", &created.order_type, &order.order_type)?;
    echo("price", &created.price, &order.price)?;
    echo("amount", &created.amount, &order.amount)?;
    echo("tradingPairName", &created.trading_pair_name, &order.trading_pair_name)
}

/// Check `0 <= remaining <= amount`, and `remaining == 0` once filled
pub fn check_order_invariants(order: &Order) -> ContractResult {
    let in_range = order.remaining >= Decimal::ZERO && order.remaining <= order.amount;
    let filled_ok = order.status != OrderStatus::Filled || order.remaining.is_zero();
    if !(in_range && filled_ok) {
        return Err(ContractViolation::Remaining {
            id: order.id.clone(),
            status: order.status.to_string(),
            remaining: order.remaining,
            amount: order.amount,
        });
    }
    Ok(())
}

/// Check two reads of the same order are consistent with the lifecycle
pub fn check_order_progress(before: &Order, after: &Order) -> ContractResult {
    echo("id", &before.id, &after.id)?;
    if !before.status.can_transition_to(&after.status) {
        return Err(ContractViolation::Transition {
            id: after.id.clone(),
            from: before.status.to_string(),
            to: after.status.to_string(),
        });
    }
    if after.remaining > before.remaining {
        return Err(ContractViolation::RemainingGrew {
            id: after.id.clone(),
            before: before.remaining,
            after: after.remaining,
        });
    }
    check_order_invariants(after)
}

/// Check an order is off the book after a successful cancel
///
/// Statuses this crate does not recognise pass.
pub fn check_cancelled(order: &Order) -> ContractResult {
    if order.status.is_resting() {
        return Err(ContractViolation::StillResting {
            id: order.id.clone(),
            status: order.status.to_string(),
        });
    }
    Ok(())
}

/// True for the bodies a successful cancel may carry: nothing, `{}` or `[]`
pub fn is_empty_body(body: &str) -> bool {
    matches!(body.trim(), "" | "{}" | "[]")
}
