use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::serde_lenient;

/// An employee as listed by `GET /employee_list`.
///
/// Only the fields the payroll pipeline reads are modelled; anything else the
/// backend sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "serde_lenient::id")]
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "serde_lenient::optional_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_lenient::optional_date")]
    pub dob: Option<NaiveDate>,
}
