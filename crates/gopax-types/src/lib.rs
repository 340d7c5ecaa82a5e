//! Shared wire types for the GOPAX REST API
//!
//! This crate holds the vocabulary every other crate in the workspace speaks.
//! It has minimal dependencies and performs no I/O.
//!
//! # Key Types
//!
//! - [`Side`], [`OrderType`], [`OrderStatus`] - Order enums (status is a state machine)
//! - [`PairName`] - Trading pair names in `BASE-QUOTE` form
//! - [`Timestamp`] - ISO-8601 timestamps with fractional seconds and a `Z` suffix
//! - [`number`] - Serde helpers for decimal JSON numbers
//! - [`TypeError`] - Parse errors

pub mod enums;
pub mod error;
pub mod number;
pub mod pair;
pub mod timestamp;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use pair::*;
pub use timestamp::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
