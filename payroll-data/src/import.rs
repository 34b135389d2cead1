//! Bulk import pipeline: parse, validate, submit as one batch, classify.

use payroll_core::{
    backend::{BackendError, PayrollBackend},
    bulk::BulkSummary,
    models::{Session, SessionError},
    validation::{BatchResult, RowError, validate_batch},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::csv_import::{CsvImportError, parse_csv};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Csv(#[from] CsvImportError),

    #[error("{} invalid row(s); nothing was submitted", .0.len())]
    InvalidRows(Vec<RowError>),

    #[error("no valid payroll rows to submit")]
    NothingToSubmit,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Submit the valid rows even when others were rejected.
    pub skip_invalid: bool,
}

#[derive(Debug)]
pub struct ImportReport {
    /// Rows accepted and rejected by validation.
    pub batch: BatchResult,
    pub summary: BulkSummary,
}

/// Parses and validates `text` without contacting the backend.
///
/// # Errors
///
/// * [`ImportError::Csv`] for a structural problem in the file.
/// * [`ImportError::InvalidRows`] when any row fails validation and
///   `skip_invalid` is off.
/// * [`ImportError::NothingToSubmit`] when no row survives validation.
pub fn prepare(
    text: &str,
    options: ImportOptions,
) -> Result<BatchResult, ImportError> {
    let rows = parse_csv(text)?;
    let batch = validate_batch(&rows);

    if !batch.is_clean() && !options.skip_invalid {
        return Err(ImportError::InvalidRows(batch.errors));
    }
    if batch.accepted.is_empty() {
        return Err(ImportError::NothingToSubmit);
    }
    if !batch.is_clean() {
        warn!(
            skipped = batch.errors.len(),
            submitting = batch.accepted.len(),
            "skipping invalid rows"
        );
    }
    Ok(batch)
}

/// Runs the whole import for an admin session and submits the accepted rows
/// in a single bulk request.
pub async fn import_csv(
    backend: &dyn PayrollBackend,
    session: &Session,
    text: &str,
    options: ImportOptions,
) -> Result<ImportReport, ImportError> {
    session.require_admin("bulk payroll import")?;
    let batch = prepare(text, options)?;

    let response = backend.bulk_payroll(&batch.accepted).await?;
    let summary = BulkSummary::classify(&response);
    info!(
        severity = ?summary.severity,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "bulk payroll submitted"
    );
    Ok(ImportReport { batch, summary })
}
