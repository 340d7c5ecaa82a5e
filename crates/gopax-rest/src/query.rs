//! Query parameters for windowed listings, book depth and candles

use crate::error::{RestError, RestResult};

/// Query string pairs, in transmission order
pub type QueryPairs = Vec<(&'static str, String)>;

/// Filters for trade listings (`/trades`, `/trading-pairs/{pair}/trades`)
///
/// Listings are most-recent-first. `pastmax` and `latestmin` are exclusive
/// id bounds.
///
/// `after` and `before` are forwarded verbatim. The exchange has not settled
/// what they mean (seconds vs. milliseconds, inclusive or not), so nothing
/// in this crate relies on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeWindow {
    /// Maximum rows (not enforced by the private `/trades` listing)
    pub limit: Option<u32>,
    /// Only ids strictly below this
    pub pastmax: Option<u64>,
    /// Only ids strictly above this
    pub latestmin: Option<u64>,
    /// Timestamp lower bound, unstable
    pub after: Option<u64>,
    /// Timestamp upper bound, unstable
    pub before: Option<u64>,
}

impl TradeWindow {
    /// Unfiltered listing
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of rows
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only trades with id < `id`
    pub fn past_max(mut self, id: u64) -> Self {
        self.pastmax = Some(id);
        self
    }

    /// Only trades with id > `id`
    pub fn latest_min(mut self, id: u64) -> Self {
        self.latestmin = Some(id);
        self
    }

    /// Forward an `after` timestamp
    pub fn after(mut self, ts: u64) -> Self {
        self.after = Some(ts);
        self
    }

    /// Forward a `before` timestamp
    pub fn before(mut self, ts: u64) -> Self {
        self.before = Some(ts);
        self
    }

    /// Encode as query pairs
    pub fn to_query(&self) -> QueryPairs {
        let mut params = QueryPairs::new();

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(pastmax) = self.pastmax {
            params.push(("pastmax", pastmax.to_string()));
        }
        if let Some(latestmin) = self.latestmin {
            params.push(("latestmin", latestmin.to_string()));
        }
        if let Some(after) = self.after {
            params.push(("after", after.to_string()));
        }
        if let Some(before) = self.before {
            params.push(("before", before.to_string()));
        }

        params
    }
}

/// Order book depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookLevel {
    /// Full depth, no `sequence`
    #[default]
    Full,
    /// Top of book: 1 row per side plus `sequence`
    Top,
    /// 50 rows per side plus `sequence`
    Top50,
}

impl BookLevel {
    /// Value of the `level` query parameter
    pub fn as_param(&self) -> Option<u8> {
        match self {
            Self::Full => None,
            Self::Top => Some(1),
            Self::Top50 => Some(2),
        }
    }

    /// Rows per side for truncated views
    pub fn rows(&self) -> Option<usize> {
        match self {
            Self::Full => None,
            Self::Top => Some(1),
            Self::Top50 => Some(50),
        }
    }

    /// True when the response carries a `sequence`
    pub fn has_sequence(&self) -> bool {
        !matches!(self, Self::Full)
    }

    /// Encode as query pairs
    pub fn to_query(&self) -> QueryPairs {
        self.as_param()
            .map(|level| vec![("level", level.to_string())])
            .unwrap_or_default()
    }
}

/// Candle window
///
/// `start` and `end` are epoch milliseconds; `interval` is in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleQuery {
    start: u64,
    end: u64,
    interval: u32,
}

impl CandleQuery {
    /// Create a window
    ///
    /// # Errors
    /// [`RestError::InvalidParameter`] if `interval` is zero or `end < start`.
    pub fn new(start: u64, end: u64, interval: u32) -> RestResult<Self> {
        if interval == 0 {
            return Err(RestError::InvalidParameter("candle interval must be positive".into()));
        }
        if end < start {
            return Err(RestError::InvalidParameter(format!(
                "candle window ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end, interval })
    }

    /// Window covering the `minutes` before `now`
    ///
    /// # Errors
    /// [`RestError::InvalidParameter`] if `minutes` does not fit in
    /// milliseconds, or for the reasons [`CandleQuery::new`] gives.
    pub fn last_minutes(now: u64, minutes: u64, interval: u32) -> RestResult<Self> {
        let span = minutes.checked_mul(60_000).ok_or_else(|| {
            RestError::InvalidParameter(format!("candle window of {} minutes is too long", minutes))
        })?;
        Self::new(now.saturating_sub(span), now, interval)
    }

    /// Start (epoch milliseconds)
    pub fn start(&self) -> u64 {
        self.start
    }

    /// End (epoch milliseconds)
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Interval in minutes
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Rows the exchange returns for this window: `⌊(end-start)/interval⌋ + 1`
    pub fn expected_count(&self) -> usize {
        let step = u64::from(self.interval) * 60_000;
        ((self.end - self.start) / step) as usize + 1
    }

    /// Encode as query pairs
    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
            ("interval", self.interval.to_string()),
        ]
    }
}
