//! Validation of payroll input before anything is sent to the backend.
//!
//! Single form submissions stop at the first problem. CSV batches are
//! validated row by row and every offending row gets its own error, so one
//! bad line never hides the others.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CSV_COLUMNS, NewPayroll, PayPeriod, PayrollForm, RawCsvRow};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a non-negative number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("pay_period must be in YYYY-MM form, got '{0}'")]
    InvalidPayPeriod(String),

    #[error("expected {expected} columns, found {actual}")]
    ColumnCount { expected: usize, actual: usize },
}

/// A validation failure tied to its user-facing CSV row number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row}: {error}")]
pub struct RowError {
    pub row: usize,
    pub error: ValidationError,
}

/// Outcome of validating a CSV batch: valid rows ready to submit, plus one
/// error per rejected row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub accepted: Vec<NewPayroll>,
    pub errors: Vec<RowError>,
}

impl BatchResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error lines in row order, ready to show to the user.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

static GROUPED_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d*)?$").expect("static pattern is valid")
});

/// Trims and strips thousands separators, so `"1,250.00"` reads as 1250.
/// Commas anywhere but between groups of three digits are left in place
/// and fail the parse.
fn normalize_number(s: &str) -> String {
    let s = s.trim();
    if GROUPED_NUMBER_RE.is_match(s) {
        s.replace(',', "")
    } else {
        s.to_string()
    }
}

fn parse_non_negative(
    field: &'static str,
    value: &str,
) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: value.trim().to_string(),
    };

    let parsed: Decimal = normalize_number(value).parse().map_err(|_| invalid())?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(invalid());
    }
    Ok(parsed)
}

fn parse_optional_non_negative(
    field: &'static str,
    value: &str,
) -> Result<Option<Decimal>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_non_negative(field, value).map(Some)
}

fn require<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed)
}

/// Validates one payroll form submission.
///
/// Required fields are checked first (`pay_period`, `employee_id`,
/// `basic_hours`), then the numeric fields. Empty `overtime_hours` and
/// `deductions` become 0; an empty `hourly_rate` is left for the backend
/// to resolve.
///
/// # Errors
///
/// * [`ValidationError::MissingField`] if a required field is empty.
/// * [`ValidationError::InvalidNumber`] if a numeric field is not a finite
///   number ≥ 0, or `employee_id` is not a whole number.
/// * [`ValidationError::InvalidPayPeriod`] if `pay_period` is not `YYYY-MM`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::PayrollForm;
/// use payroll_core::validation::validate_single;
///
/// let form = PayrollForm {
///     employee_id: "3".into(),
///     pay_period: "2024-03".into(),
///     basic_hours: "160".into(),
///     ..Default::default()
/// };
///
/// let payroll = validate_single(&form).unwrap();
/// assert_eq!(payroll.overtime_hours, dec!(0));
/// assert_eq!(payroll.hourly_rate, None);
/// ```
pub fn validate_single(form: &PayrollForm) -> Result<NewPayroll, ValidationError> {
    let pay_period = require("pay_period", &form.pay_period)?;
    let employee_id = require("employee_id", &form.employee_id)?;
    let basic_hours = require("basic_hours", &form.basic_hours)?;

    let employee_id: i64 = employee_id
        .parse()
        .ok()
        .filter(|id: &i64| *id >= 0)
        .ok_or_else(|| ValidationError::InvalidNumber {
            field: "employee_id",
            value: employee_id.to_string(),
        })?;
    let basic_hours = parse_non_negative("basic_hours", basic_hours)?;
    let overtime_hours =
        parse_optional_non_negative("overtime_hours", &form.overtime_hours)?.unwrap_or_default();
    let deductions =
        parse_optional_non_negative("deductions", &form.deductions)?.unwrap_or_default();
    let hourly_rate = parse_optional_non_negative("hourly_rate", &form.hourly_rate)?;

    let pay_period: PayPeriod = pay_period
        .parse()
        .map_err(|_| ValidationError::InvalidPayPeriod(pay_period.to_string()))?;

    Ok(NewPayroll {
        employee_id,
        basic_hours,
        overtime_hours,
        hourly_rate,
        deductions,
        pay_period,
    })
}

/// Validates one parsed CSV row.
///
/// # Errors
///
/// [`ValidationError::ColumnCount`] when the row does not carry exactly the
/// template's seven cells, otherwise the same errors as [`validate_single`].
pub fn validate_row(row: &RawCsvRow) -> Result<NewPayroll, ValidationError> {
    if row.cells.len() != CSV_COLUMNS.len() {
        return Err(ValidationError::ColumnCount {
            expected: CSV_COLUMNS.len(),
            actual: row.cells.len(),
        });
    }

    let form = PayrollForm {
        employee_id: row.employee_id().to_string(),
        pay_period: row.pay_period().to_string(),
        basic_hours: row.basic_hours().to_string(),
        overtime_hours: row.overtime_hours().to_string(),
        hourly_rate: row.hourly_rate().to_string(),
        deductions: row.deductions().to_string(),
    };
    validate_single(&form)
}

/// Validates every row independently and collects one error per rejected
/// row. Cross-row checks (duplicate employee and period pairs) are left to
/// the backend.
pub fn validate_batch(rows: &[RawCsvRow]) -> BatchResult {
    let mut result = BatchResult::default();

    for row in rows {
        match validate_row(row) {
            Ok(payroll) => result.accepted.push(payroll),
            Err(error) => {
                warn!(row = row.row_number, %error, "rejected payroll row");
                result.errors.push(RowError {
                    row: row.row_number,
                    error,
                });
            }
        }
    }

    debug!(
        accepted = result.accepted.len(),
        rejected = result.errors.len(),
        "validated payroll batch"
    );
    result
}
