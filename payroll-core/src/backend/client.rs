use async_trait::async_trait;
use thiserror::Error;

use crate::{
    bulk::BulkResponse,
    models::{CreatedPayroll, Employee, NewPayroll, PayPeriod, PayrollRecord},
};

/// Failures talking to the backend. Each is surfaced to the user once; none
/// are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout).
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },

    /// The backend answered `success: false`; the message is shown verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("no payroll found for employee {employee_id} in {pay_period}")]
    NotFound {
        employee_id: i64,
        pay_period: PayPeriod,
    },

    #[error("configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait PayrollBackend: Send + Sync {
    /// `POST /create_payroll`
    async fn create_payroll(
        &self,
        payroll: &NewPayroll,
    ) -> Result<CreatedPayroll, BackendError>;

    /// `POST /bulk_payroll`. The whole batch goes out in one request.
    async fn bulk_payroll(
        &self,
        payrolls: &[NewPayroll],
    ) -> Result<BulkResponse, BackendError>;

    /// `GET /employee_list`
    async fn list_employees(&self) -> Result<Vec<Employee>, BackendError>;

    /// `GET /payroll_list`, optionally narrowed to one employee.
    async fn list_payrolls(
        &self,
        employee_id: Option<i64>,
    ) -> Result<Vec<PayrollRecord>, BackendError>;

    /// Fetches the record for one employee and pay period.
    async fn find_payroll(
        &self,
        employee_id: i64,
        pay_period: PayPeriod,
    ) -> Result<PayrollRecord, BackendError> {
        self.list_payrolls(Some(employee_id))
            .await?
            .into_iter()
            .find(|r| r.employee_id == employee_id && r.pay_period == pay_period)
            .ok_or(BackendError::NotFound {
                employee_id,
                pay_period,
            })
    }
}
