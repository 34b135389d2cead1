//! Response envelopes of the HR backend.
//!
//! Every endpoint except `/bulk_payroll` wraps its payload in an object with
//! a `success` flag and an optional `message`.

use payroll_core::{
    models::{Employee, PayrollRecord},
    serde_lenient,
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Fields shared by every envelope, used to pull a message out of an error
/// response of any endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "serde_lenient::optional_decimal")]
    pub total_salary: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmployeeListResponse {
    pub success: bool,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayrollListResponse {
    pub success: bool,
    #[serde(default)]
    pub payrolls: Vec<PayrollRecord>,
    #[serde(default)]
    pub message: Option<String>,
}
