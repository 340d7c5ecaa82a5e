//! Serde helpers for decimal JSON numbers
//!
//! The API sends prices and amounts as bare JSON numbers and expects them
//! back the same way. Use with `#[serde(with = "gopax_types::number")]`.
//!
//! Encoding writes integral values as JSON integers (`1000000`, never
//! `1000000.0`) and fractional values as the shortest float text (`0.001`),
//! which is what the exchange's own clients put on the wire. The request
//! signature covers these bytes, so the form matters.
//!
//! A fractional value that does not survive the trip through `f64` is an
//! encoding error, never a silently rounded amount.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Decode a decimal from a JSON number or numeric string
pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Decimal::from_str(&s).map_err(D::Error::custom),
        StringOrNumber::Number(n) => {
            let s = n.to_string();
            // Scientific notation (e.g. 5e-6) goes through f64
            if s.contains('e') || s.contains('E') {
                let f = n.as_f64().ok_or_else(|| D::Error::custom("invalid number"))?;
                Decimal::from_f64(f).ok_or_else(|| D::Error::custom("cannot convert to decimal"))
            } else {
                Decimal::from_str(&s).map_err(D::Error::custom)
            }
        }
    }
}

/// Encode a decimal as a bare JSON number
pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract().is_zero() {
        if let Some(int) = value.to_i64() {
            return serializer.serialize_i64(int);
        }
    }

    match value.to_f64() {
        Some(float) if float.is_finite() && round_trips(value, float) => {
            serializer.serialize_f64(float)
        }
        _ => Err(S::Error::custom(format!(
            "{} is not exactly representable as a JSON number",
            value
        ))),
    }
}

/// True when the shortest text of `float` reads back as `value`
fn round_trips(value: &Decimal, float: f64) -> bool {
    Decimal::from_str(&float.to_string())
        .map(|back| back.normalize() == value.normalize())
        .unwrap_or(false)
}

/// Same as the parent module for `Option<Decimal>` fields
pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(deserialize_with = "super::deserialize")] Decimal);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(d)| d))
    }

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => super::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }
}
