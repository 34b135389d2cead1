/// Column order of the payroll upload template.
pub const CSV_COLUMNS: [&str; 7] = [
    "employee_id",
    "admin_id",
    "hourly_rate",
    "pay_period",
    "basic_hours",
    "overtime_hours",
    "deductions",
];

/// One data row of a payroll CSV upload, cells already in [`CSV_COLUMNS`]
/// order and trimmed.
///
/// `row_number` is the user-facing position of the row: the header is row 1,
/// so the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCsvRow {
    pub row_number: usize,
    pub cells: Vec<String>,
}

impl RawCsvRow {
    pub fn new(
        row_number: usize,
        cells: Vec<String>,
    ) -> Self {
        Self { row_number, cells }
    }

    fn cell(
        &self,
        index: usize,
    ) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn employee_id(&self) -> &str {
        self.cell(0)
    }

    pub fn admin_id(&self) -> &str {
        self.cell(1)
    }

    pub fn hourly_rate(&self) -> &str {
        self.cell(2)
    }

    pub fn pay_period(&self) -> &str {
        self.cell(3)
    }

    pub fn basic_hours(&self) -> &str {
        self.cell(4)
    }

    pub fn overtime_hours(&self) -> &str {
        self.cell(5)
    }

    pub fn deductions(&self) -> &str {
        self.cell(6)
    }
}
