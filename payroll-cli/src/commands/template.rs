use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use payroll_core::{backend::PayrollBackend, models::Session};
use payroll_data::{TEMPLATE_FILENAME, write_template};

/// Writes the blank upload template for every known employee.
///
/// Returns the path written.
pub async fn run<W: Write>(
    backend: &dyn PayrollBackend,
    session: &Session,
    output: Option<&Path>,
    out: &mut W,
) -> Result<PathBuf> {
    session.require_admin("template download")?;
    let employees = backend.list_employees().await?;

    let path = output.map_or_else(|| PathBuf::from(TEMPLATE_FILENAME), Path::to_path_buf);
    let file =
        File::create(&path).with_context(|| format!("Failed to create: {}", path.display()))?;
    write_template(&employees, Some(session), file)
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    writeln!(
        out,
        "Template with {} employee(s) written to {}",
        employees.len(),
        path.display()
    )?;
    Ok(path)
}
