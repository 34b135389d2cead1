//! An in-memory backend for dry runs and tests.
//!
//! It follows the same contract as the HR backend: unknown employees and
//! duplicate employee/period pairs are rejected per record, and gross salary
//! is computed here, never by the caller.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use super::client::{BackendError, PayrollBackend};
use super::factory::{BackendConfig, BackendFactory};
use crate::{
    bulk::{BulkResponse, RecordOutcome},
    calculations::common::round_half_up,
    models::{CreatedPayroll, Employee, NewPayroll, PayrollRecord},
};

/// Overtime hours are paid at this multiple of the hourly rate.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = dec!(1.5);

#[derive(Debug)]
pub struct MemoryBackend {
    employees: Vec<Employee>,
    overtime_multiplier: Decimal,
    records: Mutex<Vec<PayrollRecord>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::with_employees(Vec::new())
    }
}

impl MemoryBackend {
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn overtime_multiplier(
        mut self,
        multiplier: Decimal,
    ) -> Self {
        self.overtime_multiplier = multiplier;
        self
    }

    /// Every stored record, in insertion order.
    pub fn records(&self) -> Vec<PayrollRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PayrollRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(
        &self,
        payroll: &NewPayroll,
    ) -> Result<PayrollRecord, String> {
        let employee = self
            .employees
            .iter()
            .find(|e| e.id == payroll.employee_id)
            .ok_or_else(|| format!("Employee {} not found", payroll.employee_id))?;

        let hourly_rate = payroll
            .hourly_rate
            .or(employee.hourly_rate)
            .ok_or_else(|| format!("Hourly rate not set for employee {}", employee.id))?;

        let mut records = self.lock();
        if records
            .iter()
            .any(|r| r.employee_id == payroll.employee_id && r.pay_period == payroll.pay_period)
        {
            return Err(format!(
                "Payroll already exists for employee {} in {}",
                payroll.employee_id, payroll.pay_period
            ));
        }

        let overflow = || {
            format!(
                "Salary for employee {} in {} is too large to compute",
                payroll.employee_id, payroll.pay_period
            )
        };
        let overtime_rate = hourly_rate
            .checked_mul(self.overtime_multiplier)
            .map(round_half_up)
            .ok_or_else(overflow)?;
        let basic_pay = payroll.basic_hours.checked_mul(hourly_rate);
        let overtime_pay = payroll.overtime_hours.checked_mul(overtime_rate);
        let total_salary = basic_pay
            .zip(overtime_pay)
            .and_then(|(basic, overtime)| basic.checked_add(overtime))
            .map(round_half_up)
            .ok_or_else(overflow)?;

        let record = PayrollRecord {
            id: records.len() as i64 + 1,
            employee_id: payroll.employee_id,
            full_name: Some(employee.full_name.clone()),
            pay_period: payroll.pay_period,
            basic_hours: payroll.basic_hours,
            overtime_hours: Some(payroll.overtime_hours),
            hourly_rate: Some(hourly_rate),
            overtime_rate: Some(overtime_rate),
            deductions: Some(payroll.deductions),
            total_salary,
            paid_date: Some(Utc::now().date_naive()),
        };
        records.push(record.clone());
        debug!(
            employee_id = record.employee_id,
            pay_period = %record.pay_period,
            total_salary = %record.total_salary,
            "stored payroll record"
        );
        Ok(record)
    }
}

#[async_trait]
impl PayrollBackend for MemoryBackend {
    async fn create_payroll(
        &self,
        payroll: &NewPayroll,
    ) -> Result<CreatedPayroll, BackendError> {
        let record = self.store(payroll).map_err(BackendError::Rejected)?;
        Ok(CreatedPayroll {
            total_salary: Some(record.total_salary),
            message: Some("Payroll created successfully".to_string()),
        })
    }

    async fn bulk_payroll(
        &self,
        payrolls: &[NewPayroll],
    ) -> Result<BulkResponse, BackendError> {
        if payrolls.is_empty() {
            return Ok(BulkResponse::Whole(RecordOutcome::failed(
                "No payroll records supplied",
            )));
        }

        let outcomes = payrolls
            .iter()
            .map(|p| match self.store(p) {
                Ok(_) => RecordOutcome::ok(),
                Err(message) => RecordOutcome::failed(message),
            })
            .collect();
        Ok(BulkResponse::PerRecord(outcomes))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, BackendError> {
        Ok(self.employees.clone())
    }

    async fn list_payrolls(
        &self,
        employee_id: Option<i64>,
    ) -> Result<Vec<PayrollRecord>, BackendError> {
        Ok(self
            .lock()
            .iter()
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
            .cloned()
            .collect())
    }
}

/// [`BackendFactory`] for the `"memory"` backend, seeded from
/// [`BackendConfig::seed_employees`].
pub struct MemoryBackendFactory;

#[async_trait]
impl BackendFactory for MemoryBackendFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        config: &BackendConfig,
    ) -> Result<Box<dyn PayrollBackend>, BackendError> {
        info!(
            employees = config.seed_employees.len(),
            "using in-memory payroll backend; nothing will be persisted"
        );
        Ok(Box::new(MemoryBackend::with_employees(
            config.seed_employees.clone(),
        )))
    }
}
