//! Payroll arithmetic shared by every payslip, export and submission path.

pub mod common;
pub mod statutory;

pub use statutory::{
    PayslipDerived, StatutoryCalculator, StatutoryError, StatutoryRates, derive_payslip,
};
