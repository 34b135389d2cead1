use std::io::Write;

use anyhow::Result;
use payroll_core::{
    backend::PayrollBackend,
    calculations::derive_payslip,
    models::{PayrollForm, Session},
    validation::validate_single,
};
use tracing::info;

use super::{derived_rows, write_rows};

/// Validates one payroll form and creates it on the backend.
///
/// Nothing is sent when validation fails.
pub async fn run<W: Write>(
    backend: &dyn PayrollBackend,
    session: &Session,
    form: &PayrollForm,
    out: &mut W,
) -> Result<()> {
    session.require_admin("payroll submission")?;
    let payroll = validate_single(form)?;

    let created = backend.create_payroll(&payroll).await?;
    info!(
        employee_id = payroll.employee_id,
        pay_period = %payroll.pay_period,
        "payroll created"
    );

    writeln!(
        out,
        "{}",
        created
            .message
            .as_deref()
            .unwrap_or("Payroll created successfully")
    )?;
    if let Some(total) = created.total_salary {
        write_rows(out, &derived_rows(&derive_payslip(total)?))?;
    }
    Ok(())
}
