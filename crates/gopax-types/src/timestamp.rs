//! Exchange timestamps
//!
//! Every timestamp field in the API is an ISO-8601 UTC instant with a
//! fractional-seconds part and a literal `Z`, e.g. `2018-03-14T09:01:17.000Z`.
//! [`Timestamp`] rejects anything else, including RFC 3339 strings with a
//! numeric offset or without fractional seconds.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Validated exchange timestamp
///
/// Keeps the original text so re-serialization is byte-exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Get the timestamp as sent by the exchange
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the parsed instant
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Milliseconds since the Unix epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }
}

/// `digits-digits-digitsTdigits:digits:digits.digitsZ`
fn has_exchange_shape(s: &str) -> bool {
    fn digit_groups(part: &str, sep: char, count: usize) -> bool {
        let groups: Vec<&str> = part.split(sep).collect();
        groups.len() == count
            && groups
                .iter()
                .all(|g| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit()))
    }

    let Some(body) = s.strip_suffix('Z') else {
        return false;
    };
    let Some((date, time)) = body.split_once('T') else {
        return false;
    };
    let Some((clock, fraction)) = time.split_once('.') else {
        return false;
    };

    digit_groups(date, '-', 3) && digit_groups(clock, ':', 3) && digit_groups(fraction, '.', 1)
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TypeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if !has_exchange_shape(&raw) {
            return Err(TypeError::InvalidTimestamp(raw));
        }

        let body = &raw[..raw.len() - 1];
        match NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(naive) => Ok(Self {
                instant: naive.and_utc(),
                raw,
            }),
            Err(_) => Err(TypeError::InvalidTimestamp(raw)),
        }
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exchange_timestamp() {
        let ts: Timestamp = "2018-03-14T09:01:17.000Z".parse().unwrap();
        assert_eq!(ts.as_str(), "2018-03-14T09:01:17.000Z");
        assert_eq!(ts.timestamp_millis(), 1_521_018_077_000);
    }

    #[test]
    fn test_rejects_other_iso_forms() {
        assert!("2018-03-14T09:01:17Z".parse::<Timestamp>().is_err());
        assert!("2018-03-14T09:01:17.000+00:00".parse::<Timestamp>().is_err());
        assert!("2018-03-14 09:01:17.000Z".parse::<Timestamp>().is_err());
        assert!("1521018077000".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!("2018-02-30T09:01:17.000Z".parse::<Timestamp>().is_err());
        assert!("2018-03-14T25:01:17.000Z".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_serde_round_trip_is_byte_exact() {
        let json = "\"2021-07-01T00:00:00.123456Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), json);
    }
}
