//! Trading pair names (BTC-KRW format)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Trading pair name in `BASE-QUOTE` form, e.g. `BTC-KRW`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairName(String);

impl PairName {
    /// BTC-KRW trading pair
    pub const BTC_KRW: &'static str = "BTC-KRW";
    /// ETH-KRW trading pair
    pub const ETH_KRW: &'static str = "ETH-KRW";

    /// Get the pair name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the base asset (e.g., "BTC" from "BTC-KRW")
    pub fn base(&self) -> &str {
        self.split().0
    }

    /// Get the quote asset (e.g., "KRW" from "BTC-KRW")
    pub fn quote(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Validated on construction: a '-' exists with text on both sides
        let idx = separator(&self.0).unwrap_or(0);
        (&self.0[..idx], &self.0[idx + 1..])
    }
}

/// Position of the last '-' that has at least one character on each side
fn separator(s: &str) -> Option<usize> {
    s.rmatch_indices('-')
        .map(|(idx, _)| idx)
        .find(|&idx| idx > 0 && idx + 1 < s.len())
}

impl FromStr for PairName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match separator(s) {
            Some(_) => Ok(Self(s.to_string())),
            None => Err(TypeError::InvalidPairName(s.to_string())),
        }
    }
}

impl TryFrom<String> for PairName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match separator(&s) {
            Some(_) => Ok(Self(s)),
            None => Err(TypeError::InvalidPairName(s)),
        }
    }
}

impl From<PairName> for String {
    fn from(pair: PairName) -> Self {
        pair.0
    }
}

impl fmt::Display for PairName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PairName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parse() {
        let pair: PairName = "BTC-KRW".parse().unwrap();
        assert_eq!(pair.as_str(), "BTC-KRW");
        assert_eq!(pair.base(), "BTC");
        assert_eq!(pair.quote(), "KRW");
    }

    #[test]
    fn test_pair_parse_error() {
        assert!("BTCKRW".parse::<PairName>().is_err());
        assert!("-KRW".parse::<PairName>().is_err());
        assert!("BTC-".parse::<PairName>().is_err());
        assert!("-".parse::<PairName>().is_err());
    }

    #[test]
    fn test_pair_serde_rejects_malformed() {
        let parsed: PairName = serde_json::from_str("\"ETH-BTC\"").unwrap();
        assert_eq!(parsed.quote(), "BTC");
        assert!(serde_json::from_str::<PairName>("\"ETHBTC\"").is_err());
    }
}
