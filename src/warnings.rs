use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;

/// non-fatal conditions recorded while calculating a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// the solved payment could not cover first-period interest and was raised
    NegativeAmortizationAdjusted {
        original_payment: Money,
        adjusted_payment: Money,
    },
    /// the final row absorbed rounding drift left at the end of the term
    FinalPaymentAdjusted {
        residual: Money,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NegativeAmortizationAdjusted { original_payment, adjusted_payment } => write!(
                f,
                "payment {} would not reduce the balance (negative amortization); adjusted to {}",
                original_payment, adjusted_payment
            ),
            Warning::FinalPaymentAdjusted { residual } => write!(
                f,
                "final payment adjusted by {} to settle accumulated rounding",
                residual
            ),
        }
    }
}

/// ordered collection of warnings, logged as they are recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLog {
    warnings: Vec<Warning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, other: WarningLog) {
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_log() {
        let mut log = WarningLog::new();
        assert!(log.is_empty());

        log.record(Warning::FinalPaymentAdjusted { residual: Money::from_minor(471) });
        assert_eq!(log.len(), 1);

        let mut other = WarningLog::new();
        other.record(Warning::NegativeAmortizationAdjusted {
            original_payment: Money::from_major(2_000),
            adjusted_payment: Money::from_minor(200_001),
        });
        log.extend(other);

        let warnings = log.into_vec();
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[1], Warning::NegativeAmortizationAdjusted { .. }));
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::NegativeAmortizationAdjusted {
            original_payment: Money::from_major(2_000),
            adjusted_payment: Money::from_minor(200_001),
        };
        assert_eq!(
            w.to_string(),
            "payment 2000.00 would not reduce the balance (negative amortization); adjusted to 2000.01"
        );
    }

    #[test]
    fn test_warning_serialization() {
        let w = Warning::FinalPaymentAdjusted { residual: Money::from_minor(4) };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"kind":"final_payment_adjusted","residual":"0.04"}"#);
    }
}
