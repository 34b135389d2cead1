//! Classification of `POST /bulk_payroll` responses.
//!
//! The backend answers a bulk submission in one of two shapes: an array with
//! one `{success, message}` per submitted record, or a single
//! `{success: false, message}` object when it rejected the whole request.
//! Both are accepted here and reduced to one of three severities.

use std::fmt;

use serde::{Deserialize, Serialize};

const FALLBACK_FAILURE: &str = "Bulk payroll upload failed";

/// Per-record outcome reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecordOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Either shape the backend may send for a bulk submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkResponse {
    PerRecord(Vec<RecordOutcome>),
    Whole(RecordOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Every record was stored.
    Success,
    /// Some records were stored, some were not.
    Partial,
    /// Nothing was stored.
    Failure,
}

/// What the user is told after a bulk submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSummary {
    pub severity: Severity,
    pub succeeded: usize,
    pub failed: usize,
    /// Message of the first failed record, or the backend's whole-request
    /// message.
    pub first_failure: Option<String>,
}

impl BulkSummary {
    /// Reduces a backend response to a summary.
    ///
    /// An empty array is treated as a failure: the backend stored nothing.
    /// A whole-request object with `success: true` counts as one success.
    pub fn classify(response: &BulkResponse) -> Self {
        match response {
            BulkResponse::Whole(outcome) if outcome.success => Self {
                severity: Severity::Success,
                succeeded: 1,
                failed: 0,
                first_failure: None,
            },
            BulkResponse::Whole(outcome) => Self {
                severity: Severity::Failure,
                succeeded: 0,
                failed: 0,
                first_failure: Some(
                    outcome
                        .message
                        .clone()
                        .unwrap_or_else(|| FALLBACK_FAILURE.to_string()),
                ),
            },
            BulkResponse::PerRecord(outcomes) => {
                let succeeded = outcomes.iter().filter(|o| o.success).count();
                let failed = outcomes.len() - succeeded;
                let first_failure = outcomes
                    .iter()
                    .find(|o| !o.success)
                    .map(|o| o.message.clone().unwrap_or_else(|| FALLBACK_FAILURE.to_string()));

                let severity = if outcomes.is_empty() || succeeded == 0 {
                    Severity::Failure
                } else if failed == 0 {
                    Severity::Success
                } else {
                    Severity::Partial
                };

                Self {
                    severity,
                    succeeded,
                    failed,
                    first_failure: first_failure.or_else(|| {
                        outcomes
                            .is_empty()
                            .then(|| "backend returned no results".to_string())
                    }),
                }
            }
        }
    }
}

impl fmt::Display for BulkSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.severity {
            Severity::Success => {
                write!(f, "All {} payroll records uploaded successfully", self.succeeded)
            }
            Severity::Partial => {
                write!(f, "{} successful, {} failed", self.succeeded, self.failed)?;
                if let Some(message) = &self.first_failure {
                    write!(f, ". First error: {message}")?;
                }
                Ok(())
            }
            Severity::Failure => write!(
                f,
                "{}",
                self.first_failure.as_deref().unwrap_or(FALLBACK_FAILURE)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(json: &str) -> BulkResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserialises_per_record_array() {
        let response = parse(r#"[{"success":true},{"success":false,"message":"dup"}]"#);

        assert_eq!(
            response,
            BulkResponse::PerRecord(vec![RecordOutcome::ok(), RecordOutcome::failed("dup")])
        );
    }

    #[test]
    fn deserialises_whole_request_object() {
        let response = parse(r#"{"success":false,"message":"Invalid payload"}"#);

        assert_eq!(
            response,
            BulkResponse::Whole(RecordOutcome::failed("Invalid payload"))
        );
    }

    #[test]
    fn mixed_outcomes_are_partial() {
        let summary =
            BulkSummary::classify(&parse(r#"[{"success":true},{"success":false,"message":"dup"}]"#));

        assert_eq!(
            summary,
            BulkSummary {
                severity: Severity::Partial,
                succeeded: 1,
                failed: 1,
                first_failure: Some("dup".to_string()),
            }
        );
        assert_eq!(summary.to_string(), "1 successful, 1 failed. First error: dup");
    }

    #[test]
    fn partial_reports_first_failure_only() {
        let response = BulkResponse::PerRecord(vec![
            RecordOutcome::failed("Employee not found"),
            RecordOutcome::ok(),
            RecordOutcome::failed("dup"),
        ]);

        let summary = BulkSummary::classify(&response);

        assert_eq!(summary.severity, Severity::Partial);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.first_failure.as_deref(), Some("Employee not found"));
    }

    #[test]
    fn all_successful_is_success() {
        let response = BulkResponse::PerRecord(vec![RecordOutcome::ok(), RecordOutcome::ok()]);

        let summary = BulkSummary::classify(&response);

        assert_eq!(summary.severity, Severity::Success);
        assert_eq!(summary.first_failure, None);
        assert_eq!(summary.to_string(), "All 2 payroll records uploaded successfully");
    }

    #[test]
    fn all_failed_is_failure() {
        let response = BulkResponse::PerRecord(vec![
            RecordOutcome::failed("dup"),
            RecordOutcome::failed("dup again"),
        ]);

        let summary = BulkSummary::classify(&response);

        assert_eq!(summary.severity, Severity::Failure);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.to_string(), "dup");
    }

    #[test]
    fn whole_request_failure_surfaces_message_verbatim() {
        let summary = BulkSummary::classify(&BulkResponse::Whole(RecordOutcome::failed(
            "Database connection failed",
        )));

        assert_eq!(summary.severity, Severity::Failure);
        assert_eq!(summary.to_string(), "Database connection failed");
    }

    #[test]
    fn whole_request_failure_without_message_uses_fallback() {
        let summary = BulkSummary::classify(&parse(r#"{"success":false}"#));

        assert_eq!(summary.to_string(), "Bulk payroll upload failed");
    }

    #[test]
    fn failed_record_without_message_uses_fallback() {
        let summary = BulkSummary::classify(&parse(r#"[{"success":true},{"success":false}]"#));

        assert_eq!(
            summary.first_failure.as_deref(),
            Some("Bulk payroll upload failed")
        );
    }

    #[test]
    fn empty_array_is_failure() {
        let summary = BulkSummary::classify(&BulkResponse::PerRecord(Vec::new()));

        assert_eq!(summary.severity, Severity::Failure);
        assert_eq!(summary.to_string(), "backend returned no results");
    }
}
