use std::io::Write;

use anyhow::Result;
use payroll_core::calculations::derive_payslip;
use rust_decimal::Decimal;

use super::{derived_rows, write_rows};

/// Prints EPF, ETF and net salary for a gross amount.
pub fn run<W: Write>(
    gross: Decimal,
    out: &mut W,
) -> Result<()> {
    let derived = derive_payslip(gross)?;
    write_rows(out, &derived_rows(&derived))?;
    Ok(())
}
