use std::time::Duration;

use async_trait::async_trait;
use payroll_core::{
    backend::{BackendError, PayrollBackend},
    bulk::BulkResponse,
    models::{CreatedPayroll, Employee, NewPayroll, PayrollRecord},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::wire::{CreateResponse, EmployeeListResponse, Envelope, PayrollListResponse};

const CREATE_PAYROLL: &str = "/create_payroll";
const BULK_PAYROLL: &str = "/bulk_payroll";
const EMPLOYEE_LIST: &str = "/employee_list";
const PAYROLL_LIST: &str = "/payroll_list";

const BODY_EXCERPT: usize = 200;

/// [`PayrollBackend`] over the HR backend's JSON API.
///
/// One `reqwest::Client` is shared by every call. There is no retry: a
/// failed request is reported once.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(
        &self,
        endpoint: &str,
    ) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends `request` and returns the body of a 2xx response.
    ///
    /// A non-2xx response whose body is a `{success: false, message}`
    /// envelope becomes [`BackendError::Rejected`] so the backend's own
    /// wording reaches the user.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<String, BackendError> {
        debug!(endpoint, "sending backend request");
        let response = request.send().await.map_err(|e| BackendError::Transport {
            endpoint: endpoint.to_string(),
            message: if e.is_timeout() {
                format!("timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            },
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| BackendError::Transport {
            endpoint: endpoint.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "backend returned an error status");
            if let Ok(Envelope {
                success: false,
                message: Some(message),
            }) = serde_json::from_str::<Envelope>(&body)
            {
                return Err(BackendError::Rejected(message));
            }
            return Err(BackendError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: body.chars().take(BODY_EXCERPT).collect(),
            });
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(
        endpoint: &str,
        body: &str,
    ) -> Result<T, BackendError> {
        serde_json::from_str(body).map_err(|e| BackendError::Malformed {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

fn rejected(
    message: Option<String>,
    fallback: &str,
) -> BackendError {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    warn!(%message, "backend rejected request");
    BackendError::Rejected(message)
}

#[async_trait]
impl PayrollBackend for HttpBackend {
    async fn create_payroll(
        &self,
        payroll: &NewPayroll,
    ) -> Result<CreatedPayroll, BackendError> {
        let body = self
            .send(
                self.client.post(self.url(CREATE_PAYROLL)).json(payroll),
                CREATE_PAYROLL,
            )
            .await?;
        let response: CreateResponse = Self::decode(CREATE_PAYROLL, &body)?;

        if !response.success {
            return Err(rejected(response.message, "Failed to create payroll"));
        }
        Ok(CreatedPayroll {
            total_salary: response.total_salary,
            message: response.message,
        })
    }

    async fn bulk_payroll(
        &self,
        payrolls: &[NewPayroll],
    ) -> Result<BulkResponse, BackendError> {
        let body = self
            .send(
                self.client.post(self.url(BULK_PAYROLL)).json(payrolls),
                BULK_PAYROLL,
            )
            .await?;
        let response = Self::decode(BULK_PAYROLL, &body)?;
        debug!(records = payrolls.len(), "bulk payroll acknowledged");
        Ok(response)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, BackendError> {
        let body = self
            .send(self.client.get(self.url(EMPLOYEE_LIST)), EMPLOYEE_LIST)
            .await?;
        let response: EmployeeListResponse = Self::decode(EMPLOYEE_LIST, &body)?;

        if !response.success {
            return Err(rejected(response.message, "Failed to load employees"));
        }
        Ok(response.employees)
    }

    async fn list_payrolls(
        &self,
        employee_id: Option<i64>,
    ) -> Result<Vec<PayrollRecord>, BackendError> {
        let mut request = self.client.get(self.url(PAYROLL_LIST));
        if let Some(id) = employee_id {
            request = request.query(&[("employee_id", id)]);
        }

        let body = self.send(request, PAYROLL_LIST).await?;
        let response: PayrollListResponse = Self::decode(PAYROLL_LIST, &body)?;

        if !response.success {
            return Err(rejected(response.message, "Failed to load payroll records"));
        }
        Ok(response.payrolls)
    }
}
