//! Deserializers for backend JSON that may carry numbers as strings.
//!
//! The HR backend serialises database columns as they come out of the
//! driver, so `"165000.00"` and `165000` both show up for the same field.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

fn to_decimal<E: Error>(value: NumberOrString) -> Result<Option<Decimal>, E> {
    match value {
        NumberOrString::Int(i) => Ok(Some(Decimal::from(i))),
        NumberOrString::Float(f) => Decimal::try_from(f).map(Some).map_err(E::custom),
        NumberOrString::Text(s) if s.trim().is_empty() => Ok(None),
        NumberOrString::Text(s) => s.trim().parse::<Decimal>().map(Some).map_err(E::custom),
    }
}

pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?;
    to_decimal(value)?.ok_or_else(|| D::Error::custom("expected a number, got an empty string"))
}

pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(value) => to_decimal(value),
        None => Ok(None),
    }
}

pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => Ok(i),
        NumberOrString::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        NumberOrString::Float(f) => Err(D::Error::custom(format!("expected an integer id, got {f}"))),
        NumberOrString::Text(s) => s.trim().parse().map_err(D::Error::custom),
    }
}

/// Accepts `YYYY-MM-DD`, a full `YYYY-MM-DD HH:MM:SS` timestamp, or
/// null/empty/zero dates, which map to `None`.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(s) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let s = s.trim();
    if s.is_empty() || s.starts_with("0000-00-00") {
        return Ok(None);
    }
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid date '{s}': {e}")))
}
