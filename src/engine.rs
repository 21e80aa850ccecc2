use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::LoanInput;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::periodic_rate;
use crate::payments::{
    base_payment, constant_principal_installment, simulate, Installment, ScheduleRow, ScheduleTerms,
};
use crate::types::{AmortizationMethod, PaymentFrequency};
use crate::warnings::{Warning, WarningLog};

/// summary and schedule of a calculated loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// base payment plus escrow
    pub periodic_payment: Money,
    /// scheduled principal and interest payment of the first period
    pub base_payment: Money,
    pub periodic_rate: Rate,
    pub frequency: PaymentFrequency,
    pub present_value: Money,
    pub payoff_date: NaiveDate,
    pub total_paid: Money,
    pub total_interest: Money,
    pub warnings: Vec<Warning>,
    pub schedule: Vec<ScheduleRow>,
}

impl LoanResult {
    /// number of simulated periods
    pub fn period_count(&self) -> usize {
        self.schedule.len()
    }

    /// get row for a 1-based period
    pub fn row(&self, period: u32) -> Option<&ScheduleRow> {
        period
            .checked_sub(1)
            .and_then(|index| self.schedule.get(index as usize))
    }

    /// remaining balance after a period; period 0 is the present value
    pub fn balance_after(&self, period: u32) -> Option<Money> {
        if period == 0 {
            return Some(self.present_value);
        }
        self.row(period).map(|r| r.end_balance)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// pretty JSON of the full result
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

/// calculate payment, schedule and totals for a loan
pub fn calculate_loan(input: &LoanInput) -> Result<LoanResult> {
    let input = input.normalized()?;
    let policy = input.rounding;

    let periods = input.period_count();
    let rate = periodic_rate(
        input.annual_rate_percent,
        input.frequency.periods_per_year(),
        input.compounding,
    )?;
    let present_value = input.present_value();
    let escrow = input.escrow.amount();

    debug!(
        "calculating {} loan: pv {}, rate {} per period, {} periods, {:?}",
        input.frequency, present_value, rate, periods, input.method
    );

    let mut warnings = WarningLog::new();

    let (installment, base) = match input.method {
        AmortizationMethod::LevelPayment => {
            let solution = base_payment(present_value, rate, periods, policy)?;
            warnings.extend(solution.warnings);
            (Installment::Level { payment: solution.payment }, solution.payment)
        }
        AmortizationMethod::ConstantPrincipal => {
            let principal = constant_principal_installment(present_value, periods, policy)?;
            let first_payment = principal
                .checked_add(rate.interest_on(present_value, policy)?)
                .ok_or_else(|| LoanError::overflow("first payment"))?;
            (Installment::ConstantPrincipal { principal }, first_payment)
        }
    };

    let terms = ScheduleTerms {
        present_value,
        rate,
        period_count: periods,
        installment,
        extra_per_period: input.extra_per_period,
        lump_sum: input.lump_sum_extra,
        escrow,
        start_date: input.start_date,
        frequency: input.frequency,
        policy,
    };

    let schedule = simulate(&terms)?;
    warnings.extend(schedule.warnings);

    let payoff_date = schedule
        .rows
        .last()
        .map(|r| r.due_date)
        .unwrap_or(input.start_date);

    let total_paid = schedule
        .total_paid
        .checked_add(input.upfront_fees())
        .ok_or_else(|| LoanError::overflow("total paid"))?
        .round(policy);
    let periodic_payment = base
        .checked_add(escrow)
        .ok_or_else(|| LoanError::overflow("periodic payment"))?
        .round(policy);
    let total_interest = schedule.total_interest.round(policy);

    debug!(
        "loan settles {} after {} periods: payment {}, interest {}, paid {}",
        payoff_date,
        schedule.rows.len(),
        base,
        total_interest,
        total_paid
    );

    Ok(LoanResult {
        periodic_payment,
        base_payment: base,
        periodic_rate: rate,
        frequency: input.frequency,
        present_value,
        payoff_date,
        total_paid,
        total_interest,
        warnings: warnings.into_vec(),
        schedule: schedule.rows,
    })
}
