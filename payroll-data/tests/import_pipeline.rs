//! End-to-end tests for the import path: on-disk fixtures through the parser
//! and validator, then into the in-memory backend.

use std::io::Write;
use std::path::PathBuf;

use payroll_core::{
    backend::{MemoryBackend, PayrollBackend},
    bulk::Severity,
    models::{Employee, Role, Session},
    validation::{ValidationError, validate_batch},
};
use payroll_data::{
    CsvImportError, ImportError, ImportOptions, import_csv, load_from_file, prepare,
    write_template,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).unwrap()
}

fn employee(
    id: i64,
    rate: Decimal,
) -> Employee {
    Employee {
        id,
        full_name: format!("Employee {id}"),
        email: String::new(),
        hourly_rate: Some(rate),
        dob: None,
    }
}

fn backend() -> MemoryBackend {
    MemoryBackend::with_employees(vec![
        employee(3, dec!(1000)),
        employee(4, dec!(800)),
        employee(5, dec!(900)),
    ])
}

fn admin() -> Session {
    Session {
        id: 1,
        full_name: "Payroll Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    }
}

// ---------------------------------------------------------------------------
// parsing
// ---------------------------------------------------------------------------

#[test]
fn valid_fixture_yields_one_row_per_line_in_order() {
    let rows = load_from_file(&fixture("valid_batch.csv")).unwrap();

    let ids: Vec<_> = rows.iter().map(|r| r.employee_id()).collect();
    assert_eq!(ids, vec!["3", "4", "5"]);
    let numbers: Vec<_> = rows.iter().map(|r| r.row_number).collect();
    assert_eq!(numbers, vec![2, 3, 4]);
}

#[test]
fn valid_fixture_validates_to_records() {
    let rows = load_from_file(&fixture("valid_batch.csv")).unwrap();

    let batch = validate_batch(&rows);

    assert!(batch.is_clean(), "unexpected errors: {:?}", batch.errors);
    assert_eq!(batch.accepted.len(), 3);

    let second = &batch.accepted[1];
    assert_eq!(second.overtime_hours, Decimal::ZERO);
    assert_eq!(second.deductions, Decimal::ZERO);

    let third = &batch.accepted[2];
    assert_eq!(third.hourly_rate, None);
    assert_eq!(third.overtime_hours, dec!(4.5));
    assert_eq!(third.deductions, dec!(1200.50));
}

#[test]
fn six_column_row_fails_the_whole_file() {
    let err = load_from_file(&fixture("short_row.csv")).unwrap_err();

    assert!(
        matches!(
            err,
            CsvImportError::ColumnCount {
                row: 3,
                expected: 7,
                actual: 6
            }
        ),
        "got {err:?}"
    );
}

#[test]
fn eight_column_row_fails_the_whole_file() {
    let err = load_from_file(&fixture("long_row.csv")).unwrap_err();

    assert_eq!(err.to_string(), "Row 2: expected 7 columns, found 8");
}

#[test]
fn missing_file_reports_path() {
    let err = load_from_file(&fixture("does_not_exist.csv")).unwrap_err();

    assert!(matches!(err, CsvImportError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

// ---------------------------------------------------------------------------
// preparation
// ---------------------------------------------------------------------------

#[test]
fn non_numeric_row_is_rejected_and_others_accepted() {
    let rows = load_from_file(&fixture("mixed_batch.csv")).unwrap();

    let batch = validate_batch(&rows);

    assert_eq!(batch.accepted.len(), 2);
    assert_eq!(batch.errors.len(), 1);
    assert_eq!(batch.errors[0].row, 3);
    assert_eq!(
        batch.errors[0].error,
        ValidationError::InvalidNumber {
            field: "basic_hours",
            value: "abc".to_string(),
        }
    );
}

#[test]
fn prepare_refuses_a_batch_with_invalid_rows() {
    let err = prepare(&fixture_text("mixed_batch.csv"), ImportOptions::default()).unwrap_err();

    match err {
        ImportError::InvalidRows(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].to_string().starts_with("Row 3: basic_hours"));
        }
        other => panic!("expected InvalidRows, got {other:?}"),
    }
}

#[test]
fn prepare_can_skip_invalid_rows() {
    let batch = prepare(
        &fixture_text("mixed_batch.csv"),
        ImportOptions { skip_invalid: true },
    )
    .unwrap();

    let ids: Vec<_> = batch.accepted.iter().map(|p| p.employee_id).collect();
    assert_eq!(ids, vec![3, 5]);
    assert_eq!(batch.errors.len(), 1);
}

#[test]
fn header_only_file_has_nothing_to_submit() {
    let header = "employee_id,admin_id,hourly_rate,pay_period,basic_hours,overtime_hours,deductions\n";

    let err = prepare(header, ImportOptions::default()).unwrap_err();

    assert!(matches!(err, ImportError::NothingToSubmit), "got {err:?}");
}

// ---------------------------------------------------------------------------
// submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clean_import_is_full_success() {
    let backend = backend();

    let report = import_csv(
        &backend,
        &admin(),
        &fixture_text("valid_batch.csv"),
        ImportOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.summary.severity, Severity::Success);
    assert_eq!(
        report.summary.to_string(),
        "All 3 payroll records uploaded successfully"
    );
    assert_eq!(backend.list_payrolls(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn reimporting_the_same_period_fails_every_record() {
    let backend = backend();
    let text = fixture_text("valid_batch.csv");
    import_csv(&backend, &admin(), &text, ImportOptions::default())
        .await
        .unwrap();

    let report = import_csv(&backend, &admin(), &text, ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.summary.severity, Severity::Failure);
    assert_eq!(report.summary.failed, 3);
    assert_eq!(
        report.summary.to_string(),
        "Payroll already exists for employee 3 in 2024-03"
    );
}

#[tokio::test]
async fn invalid_rows_never_reach_the_backend() {
    let backend = backend();

    let result = import_csv(
        &backend,
        &admin(),
        &fixture_text("mixed_batch.csv"),
        ImportOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(ImportError::InvalidRows(_))));
    assert!(backend.records().is_empty());
}

#[tokio::test]
async fn employee_session_may_not_import() {
    let backend = backend();
    let session = Session {
        role: Role::Employee,
        ..admin()
    };

    let result = import_csv(
        &backend,
        &session,
        &fixture_text("valid_batch.csv"),
        ImportOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(ImportError::Session(_))));
    assert!(backend.records().is_empty());
}

// ---------------------------------------------------------------------------
// template
// ---------------------------------------------------------------------------

#[test]
fn template_file_parses_back_with_prefilled_ids() {
    let employees = vec![employee(3, dec!(1000)), employee(4, dec!(800))];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_template(&employees, Some(&admin()), &mut file).unwrap();
    file.flush().unwrap();

    let rows = load_from_file(file.path()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].employee_id(), "3");
    assert_eq!(rows[0].admin_id(), "1");
    assert_eq!(rows[0].hourly_rate(), "1000");

    // An unfilled template is not importable until the period and hours are
    // entered.
    let batch = validate_batch(&rows);
    assert_eq!(batch.accepted.len(), 0);
    assert_eq!(
        batch.errors[0].error,
        ValidationError::MissingField {
            field: "pay_period"
        }
    );
}
