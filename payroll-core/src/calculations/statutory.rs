//! Statutory contributions derived from a gross salary.
//!
//! | Value        | Formula                              |
//! |--------------|--------------------------------------|
//! | EPF          | `round2(gross × 8%)`                 |
//! | ETF          | `round2(gross × 3%)`                 |
//! | Net salary   | `round2(gross − EPF − ETF)`          |
//!
//! The `deductions` a payroll record carries are tracked separately and are
//! not part of this derivation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::derive_payslip;
//!
//! let derived = derive_payslip(dec!(165000)).unwrap();
//!
//! assert_eq!(derived.epf, dec!(13200.00));
//! assert_eq!(derived.etf, dec!(4950.00));
//! assert_eq!(derived.net_salary, dec!(146850.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;

/// Errors that can occur while deriving statutory contributions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatutoryError {
    /// Gross salary below zero means the backend sent bad data.
    #[error("gross salary must not be negative, got {0}")]
    NegativeGross(Decimal),

    #[error("EPF rate must be between 0 and 1, got {0}")]
    InvalidEpfRate(Decimal),

    #[error("ETF rate must be between 0 and 1, got {0}")]
    InvalidEtfRate(Decimal),

    #[error("combined EPF and ETF rates must not exceed 1, got {0}")]
    CombinedRateTooHigh(Decimal),
}

/// Contribution rates applied to gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Employee Provident Fund share of gross salary.
    pub epf_rate: Decimal,
    /// Employee Trust Fund share of gross salary.
    pub etf_rate: Decimal,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            epf_rate: dec!(0.08),
            etf_rate: dec!(0.03),
        }
    }
}

impl StatutoryRates {
    /// Validates the configured rates.
    ///
    /// # Errors
    ///
    /// Returns [`StatutoryError`] if either rate is outside `[0, 1]` or the
    /// two together exceed 1.
    pub fn validate(&self) -> Result<(), StatutoryError> {
        if self.epf_rate < Decimal::ZERO || self.epf_rate > Decimal::ONE {
            return Err(StatutoryError::InvalidEpfRate(self.epf_rate));
        }
        if self.etf_rate < Decimal::ZERO || self.etf_rate > Decimal::ONE {
            return Err(StatutoryError::InvalidEtfRate(self.etf_rate));
        }
        let combined = self.epf_rate + self.etf_rate;
        if combined > Decimal::ONE {
            return Err(StatutoryError::CombinedRateTooHigh(combined));
        }
        Ok(())
    }
}

/// EPF, ETF and net salary for one gross amount.
///
/// Never persisted; recomputed from the last fetched `total_salary` every
/// time a payslip is rendered or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipDerived {
    pub gross: Decimal,
    pub epf: Decimal,
    pub etf: Decimal,
    pub net_salary: Decimal,
}

/// Calculator for statutory contributions.
#[derive(Debug, Clone, Default)]
pub struct StatutoryCalculator {
    rates: StatutoryRates,
}

impl StatutoryCalculator {
    pub fn new(rates: StatutoryRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Derives EPF, ETF and net salary from `gross`.
    ///
    /// # Errors
    ///
    /// Returns [`StatutoryError::NegativeGross`] for a negative gross, or a
    /// rate error if the configured rates are invalid.
    pub fn calculate(
        &self,
        gross: Decimal,
    ) -> Result<PayslipDerived, StatutoryError> {
        self.rates.validate()?;

        if gross < Decimal::ZERO {
            warn!(gross = %gross, "refusing to derive contributions from a negative gross");
            return Err(StatutoryError::NegativeGross(gross));
        }

        let epf = self.epf(gross);
        let etf = self.etf(gross);
        let net_salary = round_half_up(gross - epf - etf);

        Ok(PayslipDerived {
            gross,
            epf,
            etf,
            net_salary,
        })
    }

    fn epf(
        &self,
        gross: Decimal,
    ) -> Decimal {
        round_half_up(gross * self.rates.epf_rate)
    }

    fn etf(
        &self,
        gross: Decimal,
    ) -> Decimal {
        round_half_up(gross * self.rates.etf_rate)
    }
}

/// Derives contributions using the standard 8% EPF and 3% ETF rates.
pub fn derive_payslip(gross: Decimal) -> Result<PayslipDerived, StatutoryError> {
    StatutoryCalculator::default().calculate(gross)
}
