use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use payroll_core::{
    backend::PayrollBackend,
    models::{PayPeriod, Session},
    payslip::{PayslipView, assemble_payslip},
};
use tracing::info;

use super::write_rows;

fn header_rows(view: &PayslipView) -> Vec<(&'static str, String)> {
    vec![
        ("Employee ID", view.employee_id.to_string()),
        ("Employee", view.full_name.clone().unwrap_or_default()),
        ("Pay Period", view.pay_period.to_string()),
        (
            "Paid Date",
            view.paid_date.map(|d| d.to_string()).unwrap_or_default(),
        ),
    ]
}

/// Writes the payslip as a two-column `item,value` CSV named after
/// [`PayslipView::file_stem`] inside `dir`.
pub fn export_csv(view: &PayslipView, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", view.file_stem()));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create: {}", path.display()))?;

    writer.write_record(["item", "value"])?;
    for (label, value) in header_rows(view) {
        writer.write_record([label, value.as_str()])?;
    }
    for item in &view.line_items {
        writer.write_record([item.label, item.display_value().as_str()])?;
    }
    writer.flush()?;
    Ok(path)
}

/// Shows one payslip and, with `export_dir`, saves it as CSV.
///
/// `employee_id` defaults to the signed-in user. Employees can only see
/// their own payslips.
pub async fn run<W: Write>(
    backend: &dyn PayrollBackend,
    session: &Session,
    employee_id: Option<i64>,
    pay_period: PayPeriod,
    export_dir: Option<&Path>,
    out: &mut W,
) -> Result<Option<PathBuf>> {
    let employee_id = employee_id.unwrap_or(session.id);
    session.require_access_to(employee_id)?;

    let record = backend.find_payroll(employee_id, pay_period).await?;
    let view = assemble_payslip(&record)?;

    let mut rows = header_rows(&view);
    rows.extend(
        view.line_items
            .iter()
            .map(|item| (item.label, item.display_value())),
    );
    write_rows(out, &rows)?;

    let Some(dir) = export_dir else {
        return Ok(None);
    };
    let path = export_csv(&view, dir)?;
    info!(path = %path.display(), "payslip exported");
    writeln!(out, "Saved {}", path.display())?;
    Ok(Some(path))
}
