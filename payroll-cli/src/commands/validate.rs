use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use payroll_core::validation::validate_batch;
use payroll_data::load_from_file;

/// Checks a CSV upload without contacting the backend.
pub fn run<W: Write>(
    path: &Path,
    out: &mut W,
) -> Result<()> {
    let rows = load_from_file(path).with_context(|| format!("Failed to parse: {}", path.display()))?;
    let batch = validate_batch(&rows);

    for message in batch.error_messages() {
        writeln!(out, "{message}")?;
    }
    writeln!(
        out,
        "{} valid, {} invalid",
        batch.accepted.len(),
        batch.errors.len()
    )?;

    if !batch.is_clean() {
        bail!("{} row(s) failed validation", batch.errors.len());
    }
    Ok(())
}
