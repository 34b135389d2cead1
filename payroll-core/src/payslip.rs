//! Assembly of payslip data for tabular display and export.
//!
//! A [`PayslipView`] is a flat, presentation-ready structure: the payroll
//! record, its derived contributions, and a fixed list of line items. The
//! numbers stay as [`Decimal`]; only the `display_*` helpers format them.

use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;

use crate::{
    calculations::{
        PayslipDerived, StatutoryCalculator, StatutoryError, common::round_half_up,
    },
    models::{PayPeriod, PayrollRecord},
};

const CURRENCY_PREFIX: &str = "Rs. ";

/// Formats an amount as `1,234.56`: two decimals, half-up rounded, comma
/// thousands separators.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);

    let whole = match whole.to_u128() {
        Some(w) => w.to_formatted_string(&Locale::en),
        None => whole.to_string(),
    };
    format!("{sign}{whole}.{cents:02}")
}

/// Formats an amount for payslips, e.g. `Rs. 146,850.00`.
pub fn format_currency(amount: Decimal) -> String {
    format!("{CURRENCY_PREFIX}{}", format_amount(amount))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineAmount {
    Hours(Decimal),
    Money(Decimal),
    /// The backend did not supply the value and it cannot be inferred.
    Unavailable,
}

impl LineAmount {
    pub fn display(&self) -> String {
        match self {
            LineAmount::Hours(h) => format!("{:.2}", round_half_up(*h)),
            LineAmount::Money(m) => format_currency(*m),
            LineAmount::Unavailable => "—".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: LineAmount,
}

impl LineItem {
    fn new(
        label: &'static str,
        amount: LineAmount,
    ) -> Self {
        Self { label, amount }
    }

    pub fn display_value(&self) -> String {
        self.amount.display()
    }
}

/// Everything a payslip renderer needs for one employee and pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipView {
    pub employee_id: i64,
    pub full_name: Option<String>,
    pub pay_period: PayPeriod,
    pub paid_date: Option<NaiveDate>,
    pub derived: PayslipDerived,
    pub deductions: Decimal,
    pub line_items: Vec<LineItem>,
}

impl PayslipView {
    /// `Payslip_{employee_id}_{pay_period}`, shared by every export format.
    pub fn file_stem(&self) -> String {
        format!("Payslip_{}_{}", self.employee_id, self.pay_period)
    }

    pub fn pdf_filename(&self) -> String {
        format!("{}.pdf", self.file_stem())
    }

    pub fn line_item(
        &self,
        label: &str,
    ) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.label == label)
    }
}

/// Overtime rate implied by `total = basic × rate + overtime × overtime_rate`,
/// used when the backend does not send one.
fn implied_overtime_rate(record: &PayrollRecord) -> Option<Decimal> {
    let overtime_hours = record.overtime_hours.filter(|h| !h.is_zero())?;
    let hourly_rate = record.hourly_rate?;
    let basic_pay = record.basic_hours.checked_mul(hourly_rate)?;
    let overtime_pay = record.total_salary.checked_sub(basic_pay)?;
    if overtime_pay.is_sign_negative() {
        return None;
    }
    overtime_pay.checked_div(overtime_hours).map(round_half_up)
}

/// Builds a payslip with the given calculator's rates.
///
/// # Errors
///
/// Propagates [`StatutoryError`] when the record's gross is negative.
pub fn assemble_payslip_with(
    calculator: &StatutoryCalculator,
    record: &PayrollRecord,
) -> Result<PayslipView, StatutoryError> {
    let derived = calculator.calculate(record.total_salary)?;
    let deductions = record.deductions.unwrap_or_default();
    let overtime_rate = record.overtime_rate.or_else(|| implied_overtime_rate(record));

    let money_or_unavailable = |value: Option<Decimal>| {
        value.map_or(LineAmount::Unavailable, LineAmount::Money)
    };

    let line_items = vec![
        LineItem::new("Basic Hours", LineAmount::Hours(record.basic_hours)),
        LineItem::new("Hourly Rate", money_or_unavailable(record.hourly_rate)),
        LineItem::new(
            "Overtime Hours",
            LineAmount::Hours(record.overtime_hours.unwrap_or_default()),
        ),
        LineItem::new("Overtime Rate", money_or_unavailable(overtime_rate)),
        LineItem::new("Gross Salary", LineAmount::Money(derived.gross)),
        LineItem::new("Deductions", LineAmount::Money(deductions)),
        LineItem::new("EPF (8%)", LineAmount::Money(derived.epf)),
        LineItem::new("ETF (3%)", LineAmount::Money(derived.etf)),
        LineItem::new("Net Salary", LineAmount::Money(derived.net_salary)),
    ];

    Ok(PayslipView {
        employee_id: record.employee_id,
        full_name: record.full_name.clone(),
        pay_period: record.pay_period,
        paid_date: record.paid_date,
        derived,
        deductions,
        line_items,
    })
}

/// Builds a payslip using the standard 8% EPF and 3% ETF rates.
pub fn assemble_payslip(record: &PayrollRecord) -> Result<PayslipView, StatutoryError> {
    assemble_payslip_with(&StatutoryCalculator::default(), record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn record() -> PayrollRecord {
        PayrollRecord {
            id: 21,
            employee_id: 3,
            full_name: Some("Nimal Perera".to_string()),
            pay_period: "2024-03".parse().unwrap(),
            basic_hours: dec!(160),
            overtime_hours: Some(dec!(10)),
            hourly_rate: Some(dec!(1000)),
            overtime_rate: None,
            deductions: Some(dec!(5000)),
            total_salary: dec!(165000),
            paid_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        }
    }

    // -----------------------------------------------------------------------
    // formatting
    // -----------------------------------------------------------------------

    #[test]
    fn format_currency_adds_prefix_separators_and_decimals() {
        assert_eq!(format_currency(dec!(146850)), "Rs. 146,850.00");
        assert_eq!(format_currency(dec!(1234567.891)), "Rs. 1,234,567.89");
        assert_eq!(format_currency(dec!(0.005)), "Rs. 0.01");
        assert_eq!(format_currency(Decimal::ZERO), "Rs. 0.00");
        assert_eq!(format_currency(dec!(999.5)), "Rs. 999.50");
    }

    #[test]
    fn format_amount_groups_amounts_beyond_u64() {
        assert_eq!(
            format_amount(dec!(12345678901234567890123.456)),
            "12,345,678,901,234,567,890,123.46"
        );
    }

    #[test]
    fn format_amount_keeps_sign() {
        assert_eq!(format_amount(dec!(-1500.25)), "-1,500.25");
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
    }

    // -----------------------------------------------------------------------
    // assembly
    // -----------------------------------------------------------------------

    #[test]
    fn line_items_follow_payslip_order() {
        let view = assemble_payslip(&record()).unwrap();

        let labels: Vec<_> = view.line_items.iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec![
                "Basic Hours",
                "Hourly Rate",
                "Overtime Hours",
                "Overtime Rate",
                "Gross Salary",
                "Deductions",
                "EPF (8%)",
                "ETF (3%)",
                "Net Salary",
            ]
        );
    }

    #[test]
    fn worked_example_values() {
        let view = assemble_payslip(&record()).unwrap();

        let displayed: Vec<_> = view
            .line_items
            .iter()
            .map(|i| (i.label, i.display_value()))
            .collect();
        assert_eq!(
            displayed,
            vec![
                ("Basic Hours", "160.00".to_string()),
                ("Hourly Rate", "Rs. 1,000.00".to_string()),
                ("Overtime Hours", "10.00".to_string()),
                ("Overtime Rate", "Rs. 500.00".to_string()),
                ("Gross Salary", "Rs. 165,000.00".to_string()),
                ("Deductions", "Rs. 5,000.00".to_string()),
                ("EPF (8%)", "Rs. 13,200.00".to_string()),
                ("ETF (3%)", "Rs. 4,950.00".to_string()),
                ("Net Salary", "Rs. 146,850.00".to_string()),
            ]
        );
        assert_eq!(view.derived.net_salary, dec!(146850.00));
    }

    #[test]
    fn backend_overtime_rate_wins_over_implied_rate() {
        let input = PayrollRecord {
            overtime_rate: Some(dec!(1500)),
            ..record()
        };

        let view = assemble_payslip(&input).unwrap();

        assert_eq!(
            view.line_item("Overtime Rate").map(|i| i.amount),
            Some(LineAmount::Money(dec!(1500)))
        );
    }

    #[test]
    fn overflowing_implied_rate_displays_as_unavailable() {
        let input = PayrollRecord {
            basic_hours: dec!(100000000000000000000),
            hourly_rate: Some(dec!(10000000000)),
            ..record()
        };

        let view = assemble_payslip(&input).unwrap();

        assert_eq!(
            view.line_item("Overtime Rate").map(|i| i.amount),
            Some(LineAmount::Unavailable)
        );
        assert_eq!(view.derived.net_salary, dec!(146850.00));
    }

    #[test]
    fn missing_rates_display_as_unavailable() {
        let input = PayrollRecord {
            hourly_rate: None,
            overtime_hours: None,
            deductions: None,
            ..record()
        };

        let view = assemble_payslip(&input).unwrap();

        assert_eq!(
            view.line_item("Hourly Rate").map(LineItem::display_value),
            Some("—".to_string())
        );
        assert_eq!(
            view.line_item("Overtime Rate").map(|i| i.amount),
            Some(LineAmount::Unavailable)
        );
        assert_eq!(
            view.line_item("Overtime Hours").map(LineItem::display_value),
            Some("0.00".to_string())
        );
        assert_eq!(view.deductions, Decimal::ZERO);
    }

    #[test]
    fn filename_is_deterministic() {
        let view = assemble_payslip(&record()).unwrap();

        assert_eq!(view.pdf_filename(), "Payslip_3_2024-03.pdf");
        assert_eq!(view.file_stem(), "Payslip_3_2024-03");
    }

    #[test]
    fn negative_gross_is_rejected() {
        let input = PayrollRecord {
            total_salary: dec!(-10),
            ..record()
        };

        assert_eq!(
            assemble_payslip(&input),
            Err(StatutoryError::NegativeGross(dec!(-10)))
        );
    }
}
