//! Error types for parsing wire values

use thiserror::Error;

/// A wire value did not have the shape the API contract requires
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Trading pair name is not `BASE-QUOTE`
    #[error("Invalid trading pair name: {0:?}")]
    InvalidPairName(String),

    /// Timestamp does not match `YYYY-MM-DDTHH:MM:SS.fffZ`
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Side is neither `buy` nor `sell`
    #[error("Invalid side: {0:?}")]
    InvalidSide(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_quotes_input() {
        let err = TypeError::InvalidPairName("BTCKRW".to_string());
        assert_eq!(err.to_string(), "Invalid trading pair name: \"BTCKRW\"");
    }
}
