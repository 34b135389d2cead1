use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{models::PayPeriod, serde_lenient};

/// Raw payroll input exactly as a user typed it into the payroll form.
///
/// Every field is text; [`crate::validation::validate_single`] turns it into
/// a [`NewPayroll`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollForm {
    pub employee_id: String,
    pub pay_period: String,
    pub basic_hours: String,
    pub overtime_hours: String,
    pub hourly_rate: String,
    pub deductions: String,
}

/// A validated payroll submission, serialised as the body of
/// `POST /create_payroll` and as one element of `POST /bulk_payroll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayroll {
    pub employee_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub basic_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub overtime_hours: Decimal,
    /// Left unset when the backend should resolve it from the employee.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hourly_rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub deductions: Decimal,
    pub pay_period: PayPeriod,
}

/// What `POST /create_payroll` hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPayroll {
    pub total_salary: Option<Decimal>,
    pub message: Option<String>,
}

/// A payroll row confirmed by the backend (`GET /payroll_list`).
///
/// The backend is the only writer of `total_salary` and `paid_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    #[serde(default, deserialize_with = "serde_lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "serde_lenient::id")]
    pub employee_id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    pub pay_period: PayPeriod,
    #[serde(deserialize_with = "serde_lenient::decimal")]
    pub basic_hours: Decimal,
    #[serde(default, deserialize_with = "serde_lenient::optional_decimal")]
    pub overtime_hours: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_lenient::optional_decimal")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_lenient::optional_decimal")]
    pub overtime_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_lenient::optional_decimal")]
    pub deductions: Option<Decimal>,
    #[serde(deserialize_with = "serde_lenient::decimal")]
    pub total_salary: Decimal,
    #[serde(default, deserialize_with = "serde_lenient::optional_date")]
    pub paid_date: Option<NaiveDate>,
}
