//! Side, OrderType, and OrderStatus enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Order or trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Returns the side as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(TypeError::InvalidSide(other.to_string())),
        }
    }
}

/// Order type
///
/// The exchange reports the type as a free-form string. Known values map to
/// variants; anything else is kept verbatim in [`OrderType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    /// Limit order - rests on the book at the given price
    Limit,
    /// Market order - executes immediately at best available price
    Market,
    /// Type string this crate does not know about
    Other(String),
}

impl OrderType {
    /// Returns the type as used in API messages
    pub fn as_str(&self) -> &str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "limit" => Self::Limit,
            "market" => Self::Market,
            _ => Self::Other(s),
        }
    }
}

impl From<OrderType> for String {
    fn from(t: OrderType) -> Self {
        match t {
            OrderType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order lifecycle status
///
/// ```text
/// Open --(fill)--> PartiallyFilled --(fill)--> Filled
///   |                    |
///   +----(cancel)--------+--> Canceled
/// ```
///
/// The exchange's own strings (`placed`, `updated`, `completed`, `cancelled`)
/// and the conventional English spellings both decode to the matching
/// variant. Unrecognised strings are preserved in [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Resting on the book, nothing filled yet
    Open,
    /// Resting on the book with some quantity filled
    PartiallyFilled,
    /// Fully filled, `remaining` is zero
    Filled,
    /// Canceled by the owner
    Canceled,
    /// Status string this crate does not know about
    Other(String),
}

impl OrderStatus {
    /// Returns the status as sent by the exchange
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "placed",
            Self::PartiallyFilled => "updated",
            Self::Filled => "completed",
            Self::Canceled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    /// Returns true while the order can still trade
    pub fn is_resting(&self) -> bool {
        matches!(self, Self::Open | Self::PartiallyFilled)
    }

    /// Returns true once the order can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled)
    }

    /// Returns true if the lifecycle allows moving from `self` to `next`
    ///
    /// Re-reading the same status is always allowed. Transitions involving
    /// an unknown status cannot be judged and are allowed.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        if self == next {
            return true;
        }
        match (self, next) {
            (Self::Other(_), _) | (_, Self::Other(_)) => true,
            (Self::Open, Self::PartiallyFilled | Self::Filled | Self::Canceled) => true,
            (Self::PartiallyFilled, Self::Filled | Self::Canceled) => true,
            _ => false,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "placed" | "open" => Self::Open,
            "updated" | "partially_filled" | "partially-filled" => Self::PartiallyFilled,
            "completed" | "filled" => Self::Filled,
            "cancelled" | "canceled" => Self::Canceled,
            _ => Self::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_serde() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
        let parsed: Side = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(parsed, Side::Sell);
        assert!(serde_json::from_str::<Side>("\"hold\"").is_err());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_type_keeps_unknown() {
        let parsed: OrderType = serde_json::from_str("\"stop\"").unwrap();
        assert_eq!(parsed, OrderType::Other("stop".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"stop\"");
        assert_eq!(serde_json::to_string(&OrderType::Limit).unwrap(), "\"limit\"");
    }

    #[test]
    fn test_status_aliases() {
        let placed: OrderStatus = serde_json::from_str("\"placed\"").unwrap();
        let cancelled: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        let canceled: OrderStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(placed, OrderStatus::Open);
        assert_eq!(cancelled, OrderStatus::Canceled);
        assert_eq!(canceled, OrderStatus::Canceled);
    }

    #[test]
    fn test_status_lifecycle() {
        use OrderStatus::*;

        assert!(Open.can_transition_to(&Canceled));
        assert!(Open.can_transition_to(&PartiallyFilled));
        assert!(PartiallyFilled.can_transition_to(&Filled));
        assert!(!Filled.can_transition_to(&Open));
        assert!(!Canceled.can_transition_to(&PartiallyFilled));
        assert!(Canceled.can_transition_to(&Canceled));

        assert!(Open.is_resting());
        assert!(PartiallyFilled.is_resting());
        assert!(Filled.is_terminal());
        assert!(!Other("pending".into()).is_resting());
    }
}
