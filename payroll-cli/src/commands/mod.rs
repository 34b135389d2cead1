//! One module per subcommand. Each writes its report to the given writer so
//! the binary can pass stdout and tests can pass a buffer.

pub mod calc;
pub mod import;
pub mod payslip;
pub mod submit;
pub mod template;
pub mod validate;

use std::io::Write;

use payroll_core::{calculations::PayslipDerived, payslip::format_currency};

const LABEL_WIDTH: usize = 16;

/// Writes `label  value` pairs with the values right-aligned in one column.
pub(crate) fn write_rows<W: Write>(
    out: &mut W,
    rows: &[(&str, String)],
) -> std::io::Result<()> {
    let width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        writeln!(out, "{label:<pad$}{value:>width$}", pad = LABEL_WIDTH)?;
    }
    Ok(())
}

pub(crate) fn derived_rows(derived: &PayslipDerived) -> Vec<(&'static str, String)> {
    vec![
        ("Gross Salary", format_currency(derived.gross)),
        ("EPF (8%)", format_currency(derived.epf)),
        ("ETF (3%)", format_currency(derived.etf)),
        ("Net Salary", format_currency(derived.net_salary)),
    ]
}
