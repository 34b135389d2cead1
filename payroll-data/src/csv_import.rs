//! CSV parser for bulk payroll uploads.
//!
//! ## CSV Format
//!
//! The first non-blank line is a header and is never imported. Blank lines
//! are skipped anywhere in the file.
//!
//! | Column           | Required | Notes                                   |
//! |------------------|----------|-----------------------------------------|
//! | `employee_id`    | yes      | integer                                 |
//! | `admin_id`       | no       | carried through, never used             |
//! | `hourly_rate`    | no       | empty means the employee's stored rate  |
//! | `pay_period`     | yes      | `YYYY-MM`                               |
//! | `basic_hours`    | yes      | decimal                                 |
//! | `overtime_hours` | no       | empty reads as `0`                      |
//! | `deductions`     | no       | empty reads as `0`                      |
//!
//! When the header is exactly the seven column names, they are matched by
//! name and may appear in any order. Any other header is ignored and the
//! columns are read by position, in the order above. Either way every data
//! row must have seven cells.
//!
//! ```csv
//! employee_id,admin_id,hourly_rate,pay_period,basic_hours,overtime_hours,deductions
//! 3,1,1000,2024-03,160,10,5000
//! 4,1,,2024-03,150,,
//! ```
//!
//! Parsing is structural only: a row with the wrong number of cells aborts
//! the whole file, but cell contents are checked later by
//! [`payroll_core::validation::validate_batch`].

use std::path::{Path, PathBuf};

use payroll_core::models::{CSV_COLUMNS, RawCsvRow};
use thiserror::Error;
use tracing::debug;

const OVERTIME_HOURS: usize = 5;
const DEDUCTIONS: usize = 6;

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Row {row}: expected {expected} columns, found {actual}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where each canonical column lives in the file.
enum Layout {
    Positional,
    /// `positions[i]` is the file column holding `CSV_COLUMNS[i]`.
    ByName { positions: [usize; 7] },
}

impl Layout {
    /// Columns are matched by name only when the header is exactly the
    /// seven canonical names in some order.
    fn from_header(header: &csv::StringRecord) -> Self {
        if header.len() != CSV_COLUMNS.len() {
            return Layout::Positional;
        }
        let mut positions = [0; 7];
        for (slot, name) in positions.iter_mut().zip(CSV_COLUMNS) {
            match header.iter().position(|h| h.eq_ignore_ascii_case(name)) {
                Some(index) => *slot = index,
                None => return Layout::Positional,
            }
        }
        Layout::ByName { positions }
    }

    fn cells(&self, record: &csv::StringRecord) -> Vec<String> {
        let mut cells: Vec<String> = match self {
            Layout::Positional => record.iter().map(str::to_string).collect(),
            Layout::ByName { positions, .. } => positions
                .iter()
                .map(|&i| record.get(i).unwrap_or_default().to_string())
                .collect(),
        };

        for index in [OVERTIME_HOURS, DEDUCTIONS] {
            if let Some(cell) = cells.get_mut(index)
                && cell.is_empty()
            {
                *cell = "0".to_string();
            }
        }
        cells
    }
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty) && record.len() <= 1
}

/// Parses an uploaded CSV into raw rows, in file order.
///
/// Row numbers count the header as row 1, so the first data row is row 2.
/// Blank lines do not count.
///
/// # Errors
///
/// * [`CsvImportError::Parse`] when the text is not well-formed CSV.
/// * [`CsvImportError::ColumnCount`] for the first row whose width differs
///   from the seven template columns. Nothing is returned in that case.
pub fn parse_csv(input: &str) -> Result<Vec<RawCsvRow>, CsvImportError> {
    let input = input.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let mut records = reader.records();
    let layout = loop {
        match records.next() {
            None => return Ok(Vec::new()),
            Some(record) => {
                let record = record?;
                if !is_blank(&record) {
                    break Layout::from_header(&record);
                }
            }
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let row_number = rows.len() + 2;
        if record.len() != CSV_COLUMNS.len() {
            return Err(CsvImportError::ColumnCount {
                row: row_number,
                expected: CSV_COLUMNS.len(),
                actual: record.len(),
            });
        }
        rows.push(RawCsvRow::new(row_number, layout.cells(&record)));
    }

    debug!(
        rows = rows.len(),
        by_name = matches!(layout, Layout::ByName { .. }),
        "parsed payroll CSV"
    );
    Ok(rows)
}

/// Reads a file from disk and delegates to [`parse_csv`].
pub fn load_from_file(path: &Path) -> Result<Vec<RawCsvRow>, CsvImportError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(&contents)
}
