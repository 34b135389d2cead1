mod employee;
mod pay_period;
mod payroll;
mod raw_row;
mod session;

pub use employee::Employee;
pub use pay_period::{PayPeriod, PayPeriodError};
pub use payroll::{CreatedPayroll, NewPayroll, PayrollForm, PayrollRecord};
pub use raw_row::{CSV_COLUMNS, RawCsvRow};
pub use session::{Role, Session, SessionError};
