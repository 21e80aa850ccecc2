use chrono::{Days, Months, NaiveDate};
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{LoanError, Result};

/// how often payments fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Biweekly,
    Weekly,
}

impl PaymentFrequency {
    /// number of payment periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    /// number of payment periods covering a term in months, rounded up
    pub fn periods_for_term(&self, term_months: u32) -> u32 {
        let periods = (term_months as u64 * self.periods_per_year() as u64).div_ceil(12);
        periods.min(u32::MAX as u64) as u32
    }

    /// due date one interval after `previous`
    ///
    /// monthly stepping clamps to the end of shorter months and carries the
    /// clamped day forward, so a 31st start settles on the 29th after a leap
    /// February
    pub fn next_due_date(&self, previous: NaiveDate) -> Result<NaiveDate> {
        let stepped = match self {
            PaymentFrequency::Monthly => previous.checked_add_months(Months::new(1)),
            PaymentFrequency::Biweekly => previous.checked_add_days(Days::new(14)),
            PaymentFrequency::Weekly => previous.checked_add_days(Days::new(7)),
        };

        stepped.ok_or_else(|| LoanError::Calculation {
            message: format!("due date overflow: {} step from {}", self, previous),
        })
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Weekly => "weekly",
        };
        write!(f, "{name}")
    }
}

/// how the annual rate turns into a per-period rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// nominal rate compounded monthly, scaled linearly to the payment period
    #[default]
    NominalMonthly,
    /// nominal rate compounded daily (365 days) into the payment period
    NominalDaily,
    /// effective annual rate
    EffectiveAnnual,
}

/// monetary rounding policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// round half away from zero, the usual "nearest cent"
    #[default]
    HalfUp,
    /// banker's rounding
    HalfEven,
}

impl RoundingPolicy {
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingPolicy::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingPolicy::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// amortization method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationMethod {
    /// equal payment amounts throughout term
    #[default]
    LevelPayment,
    /// equal principal each period, interest on the declining balance
    ConstantPrincipal,
}

/// simulation phase of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationPhase {
    /// balance above the half-cent threshold and periods remaining
    Accruing,
    /// balance at or below the half-cent threshold
    Settled,
}
