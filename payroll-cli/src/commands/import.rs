use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use payroll_core::{backend::PayrollBackend, bulk::Severity, models::Session};
use payroll_data::{ImportError, ImportOptions, import_csv};

/// Imports a CSV upload as one bulk submission and reports the outcome.
pub async fn run<W: Write>(
    backend: &dyn PayrollBackend,
    session: &Session,
    path: &Path,
    options: ImportOptions,
    out: &mut W,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;

    let report = match import_csv(backend, session, &text, options).await {
        Ok(report) => report,
        Err(ImportError::InvalidRows(errors)) => {
            for error in &errors {
                writeln!(out, "{error}")?;
            }
            bail!(
                "{} row(s) failed validation; nothing was submitted",
                errors.len()
            );
        }
        Err(other) => return Err(other.into()),
    };

    for message in report.batch.error_messages() {
        writeln!(out, "skipped {message}")?;
    }
    writeln!(out, "{}", report.summary)?;

    if report.summary.severity == Severity::Failure {
        bail!("bulk payroll upload failed");
    }
    Ok(())
}
