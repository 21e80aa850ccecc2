use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::LoanInput;
use crate::decimal::Money;
use crate::engine::{calculate_loan, LoanResult};
use crate::errors::Result;
use crate::types::PaymentFrequency;

/// two calculated scenarios and their differences, always `a - b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub a: LoanResult,
    pub b: LoanResult,
    pub payment_diff: Money,
    pub interest_diff: Money,
    pub total_paid_diff: Money,
    /// rows in `a` minus rows in `b`; positive when `b` pays off sooner
    pub periods_saved: i64,
}

impl ComparisonResult {
    /// time saved by `b` as whole years and months
    ///
    /// each schedule's length is converted with its own payment frequency,
    /// so scenarios on different frequencies compare by calendar time
    pub fn periods_saved_as_years_months(&self) -> (i64, i64) {
        let (len_a, ppy_a) = term_of(&self.a);
        let (len_b, ppy_b) = term_of(&self.b);
        let months = (len_a * ppy_b - len_b * ppy_a) * 12 / (ppy_a * ppy_b);
        (months / 12, months % 12)
    }

    /// calendar days between the two payoff dates
    pub fn payoff_days_saved(&self) -> i64 {
        (self.a.payoff_date - self.b.payoff_date).num_days()
    }
}

/// rows in the schedule and payment periods per year
fn term_of(result: &LoanResult) -> (i64, i64) {
    (
        result.period_count() as i64,
        i64::from(result.frequency.periods_per_year()),
    )
}

/// calculate both scenarios and diff them
pub fn compare(a: &LoanInput, b: &LoanInput) -> Result<ComparisonResult> {
    let a = calculate_loan(a)?;
    let b = calculate_loan(b)?;
    Ok(compare_results(a, b))
}

/// diff two already calculated scenarios
pub fn compare_results(a: LoanResult, b: LoanResult) -> ComparisonResult {
    let periods_saved = a.period_count() as i64 - b.period_count() as i64;
    let result = ComparisonResult {
        payment_diff: a.periodic_payment - b.periodic_payment,
        interest_diff: a.total_interest - b.total_interest,
        total_paid_diff: a.total_paid - b.total_paid,
        periods_saved,
        a,
        b,
    };

    debug!(
        "comparison: payment diff {}, interest diff {}, {} periods saved",
        result.payment_diff, result.interest_diff, result.periods_saved
    );

    result
}
