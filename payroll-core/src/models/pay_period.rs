use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PAY_PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").expect("static pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pay period '{0}' is not in YYYY-MM form")]
pub struct PayPeriodError(pub String);

/// One payroll cycle, written `YYYY-MM` on the wire and in CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

impl PayPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, PayPeriodError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(PayPeriodError(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for PayPeriod {
    type Err = PayPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = PAY_PERIOD_RE
            .captures(trimmed)
            .ok_or_else(|| PayPeriodError(s.to_string()))?;

        let year = caps[1].parse().map_err(|_| PayPeriodError(s.to_string()))?;
        let month = caps[2].parse().map_err(|_| PayPeriodError(s.to_string()))?;
        Ok(Self { year, month })
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = PayPeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}
