//! Blank upload template: the import header plus one pre-filled row per
//! employee.

use std::io::Write;

use payroll_core::models::{CSV_COLUMNS, Employee, Session};

pub const TEMPLATE_FILENAME: &str = "payroll_template.csv";

/// Writes the template to `writer`.
///
/// Each row carries `employee_id` and `hourly_rate`; the remaining cells are
/// left for the admin to fill in. With an admin session, `admin_id` is
/// filled with the session id.
pub fn write_template<W: Write>(
    employees: &[Employee],
    session: Option<&Session>,
    writer: W,
) -> Result<(), csv::Error> {
    let admin_id = session
        .filter(|s| s.is_admin())
        .map(|s| s.id.to_string())
        .unwrap_or_default();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_COLUMNS)?;
    for employee in employees {
        let rate = employee
            .hourly_rate
            .map(|r| r.normalize().to_string())
            .unwrap_or_default();
        csv.write_record([
            employee.id.to_string().as_str(),
            admin_id.as_str(),
            rate.as_str(),
            "",
            "",
            "",
            "",
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use payroll_core::models::Role;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn employees() -> Vec<Employee> {
        vec![
            Employee {
                id: 3,
                full_name: "Nimal Perera".to_string(),
                email: String::new(),
                hourly_rate: Some(dec!(1000.00)),
                dob: None,
            },
            Employee {
                id: 4,
                full_name: "Kamala Silva".to_string(),
                email: String::new(),
                hourly_rate: None,
                dob: None,
            },
        ]
    }

    fn render(session: Option<&Session>) -> String {
        let mut out = Vec::new();
        write_template(&employees(), session, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn rows_are_prefilled_with_id_and_rate() {
        assert_eq!(
            render(None),
            "employee_id,admin_id,hourly_rate,pay_period,basic_hours,overtime_hours,deductions\n\
             3,,1000,,,,\n\
             4,,,,,,\n"
        );
    }

    #[test]
    fn admin_session_fills_admin_id() {
        let admin = Session {
            id: 1,
            full_name: "Admin".to_string(),
            email: String::new(),
            role: Role::Admin,
        };

        let text = render(Some(&admin));

        assert!(text.lines().skip(1).all(|l| l.split(',').nth(1) == Some("1")));
    }

    #[test]
    fn employee_session_leaves_admin_id_blank() {
        let employee = Session {
            id: 3,
            full_name: "Nimal Perera".to_string(),
            email: String::new(),
            role: Role::Employee,
        };

        assert_eq!(render(Some(&employee)), render(None));
    }

    #[test]
    fn no_employees_writes_header_only() {
        let mut out = Vec::new();
        write_template(&[], None, &mut out).unwrap();

        assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
    }
}
