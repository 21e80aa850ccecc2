use chrono::NaiveDate;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::future_value_factor;
use crate::types::{PaymentFrequency, RoundingPolicy, SimulationPhase};
use crate::warnings::{Warning, WarningLog};

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based period index
    pub period: u32,
    pub due_date: NaiveDate,
    /// scheduled base payment, excluding extra and escrow
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub extra: Money,
    pub escrow: Money,
    pub end_balance: Money,
}

impl ScheduleRow {
    /// cash paid in this period
    pub fn cash_paid(&self) -> Money {
        self.interest + self.principal + self.extra + self.escrow
    }
}

/// how the regular installment is determined each period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installment {
    /// fixed principal and interest payment
    Level { payment: Money },
    /// fixed principal, interest paid on top
    ConstantPrincipal { principal: Money },
}

impl Installment {
    fn principal_due(&self, interest: Money) -> Money {
        match self {
            Installment::Level { payment } => (*payment - interest).max(Money::ZERO),
            Installment::ConstantPrincipal { principal } => *principal,
        }
    }

    fn scheduled_payment(&self, interest: Money) -> Result<Money> {
        match self {
            Installment::Level { payment } => Ok(*payment),
            Installment::ConstantPrincipal { principal } => add(*principal, interest, "scheduled payment"),
        }
    }

    /// true when an end-of-term residual is explained by rounding drift
    ///
    /// each period can leave at most a cent behind, which then compounds at
    /// the periodic rate; anything above both that and one installment means
    /// the installment cannot amortize the balance
    fn within_drift(&self, residual: Money, rate: Rate, periods: u32) -> bool {
        let regular = match self {
            Installment::Level { payment } => *payment,
            Installment::ConstantPrincipal { principal } => *principal,
        };
        if residual <= regular {
            return true;
        }

        match future_value_factor(rate.as_decimal(), periods) {
            Some(factor) => residual <= Money::CENT * factor,
            None => true,
        }
    }
}

/// everything the simulator needs, already validated and rounded to cents
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTerms {
    pub present_value: Money,
    pub rate: Rate,
    /// iteration ceiling, the nominal number of periods in the term
    pub period_count: u32,
    pub installment: Installment,
    pub extra_per_period: Money,
    /// applied on the first period only
    pub lump_sum: Money,
    pub escrow: Money,
    pub start_date: NaiveDate,
    pub frequency: PaymentFrequency,
    pub policy: RoundingPolicy,
}

/// simulated schedule with running totals
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub rows: Vec<ScheduleRow>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub warnings: WarningLog,
}

impl AmortizationSchedule {
    /// get row for a 1-based period
    pub fn get_payment(&self, period: u32) -> Option<&ScheduleRow> {
        period
            .checked_sub(1)
            .and_then(|index| self.rows.get(index as usize))
    }

    pub fn final_row(&self) -> Option<&ScheduleRow> {
        self.rows.last()
    }
}

fn add(a: Money, b: Money, context: &str) -> Result<Money> {
    a.checked_add(b).ok_or_else(|| LoanError::overflow(context))
}

/// state threaded through each simulated period
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub phase: SimulationPhase,
    pub period: u32,
    /// due date of the latest simulated period, the start date before the first
    pub due_date: NaiveDate,
    pub balance: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<ScheduleRow>,
    pub warnings: WarningLog,
}

impl SimulationState {
    pub fn new(terms: &ScheduleTerms) -> Self {
        let phase = if terms.present_value > Money::HALF_CENT {
            SimulationPhase::Accruing
        } else {
            SimulationPhase::Settled
        };

        Self {
            phase,
            period: 0,
            due_date: terms.start_date,
            balance: terms.present_value,
            total_paid: Money::ZERO,
            total_interest: Money::ZERO,
            rows: Vec::with_capacity(terms.period_count.min(4_096) as usize),
            warnings: WarningLog::new(),
        }
    }

    /// true while another period may be simulated
    pub fn can_step(&self, terms: &ScheduleTerms) -> bool {
        self.phase == SimulationPhase::Accruing && self.period < terms.period_count
    }

    /// simulate one period
    pub fn step(mut self, terms: &ScheduleTerms) -> Result<Self> {
        self.period += 1;
        let policy = terms.policy;

        let interest = terms.rate.interest_on(self.balance, policy)?;
        let principal_due = terms.installment.principal_due(interest);

        let mut extra = terms.extra_per_period;
        if self.period == 1 {
            extra = add(extra, terms.lump_sum, "extra payment")?;
        }

        // never take the balance below zero
        let applied = add(principal_due, extra, "principal applied")?.min(self.balance);
        let principal = principal_due.min(applied);
        let extra_applied = applied - principal;

        let cash = add(add(interest, applied, "cash paid")?, terms.escrow, "cash paid")?;
        self.total_paid = add(self.total_paid, cash, "total paid")?;
        self.total_interest = add(self.total_interest, interest, "total interest")?;
        self.balance -= applied;
        self.due_date = terms.frequency.next_due_date(self.due_date)?;

        let row = ScheduleRow {
            period: self.period,
            due_date: self.due_date,
            payment: terms.installment.scheduled_payment(interest)?,
            interest,
            principal,
            extra: extra_applied,
            escrow: terms.escrow,
            end_balance: self.balance.max(Money::ZERO).round(policy),
        };

        trace!(
            "period {} due {}: interest {}, principal {}, extra {}, balance {}",
            row.period,
            row.due_date,
            row.interest,
            row.principal,
            row.extra,
            row.end_balance
        );

        self.rows.push(row);

        if self.balance <= Money::HALF_CENT {
            self.phase = SimulationPhase::Settled;
        }

        Ok(self)
    }

    /// fold what is left of the balance into the final row
    ///
    /// a residual within one cent is plain rounding cleanup. a larger residual
    /// at the period ceiling is accepted as accumulated drift up to the
    /// installment's drift bound and recorded as a warning; anything beyond
    /// that means the installment cannot amortize the loan
    pub fn settle(mut self, terms: &ScheduleTerms) -> Result<AmortizationSchedule> {
        let residual = self.balance;
        let periods = self.period;

        let Some(last) = self.rows.last_mut() else {
            return Err(LoanError::invalid(
                "principal",
                "present value settles before the first period",
            ));
        };

        if residual.abs() > Money::CENT {
            if !terms.installment.within_drift(residual, terms.rate, terms.period_count) {
                return Err(LoanError::NonConvergence {
                    periods,
                    remaining_balance: residual,
                });
            }
            self.warnings.record(Warning::FinalPaymentAdjusted { residual });
        }

        if !residual.is_zero() {
            last.principal = add(last.principal, residual, "final principal")?;
            last.payment = add(last.payment, residual, "final payment")?;
            last.end_balance = Money::ZERO;
            self.total_paid = add(self.total_paid, residual, "total paid")?;
            self.balance = Money::ZERO;
        }
        self.phase = SimulationPhase::Settled;

        Ok(AmortizationSchedule {
            rows: self.rows,
            total_paid: self.total_paid,
            total_interest: self.total_interest,
            warnings: self.warnings,
        })
    }
}

/// run the period loop to the settled phase or the period ceiling
pub fn simulate(terms: &ScheduleTerms) -> Result<AmortizationSchedule> {
    let mut state = SimulationState::new(terms);

    while state.can_step(terms) {
        state = state.step(terms)?;
    }

    state.settle(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(d: rust_decimal::Decimal) -> Money {
        Money::from_decimal(d)
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn level_terms(pv: Money, rate: rust_decimal::Decimal, periods: u32, payment: Money) -> ScheduleTerms {
        ScheduleTerms {
            present_value: pv,
            rate: Rate::from_decimal(rate),
            period_count: periods,
            installment: Installment::Level { payment },
            extra_per_period: Money::ZERO,
            lump_sum: Money::ZERO,
            escrow: Money::ZERO,
            start_date: start(),
            frequency: PaymentFrequency::Monthly,
            policy: RoundingPolicy::HalfUp,
        }
    }

    #[test]
    fn test_twelve_month_schedule() {
        let terms = level_terms(Money::from_major(10_000), dec!(0.005), 12, money(dec!(860.66)));
        let schedule = simulate(&terms).unwrap();

        assert_eq!(schedule.rows.len(), 12);

        let first = &schedule.rows[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.due_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(first.interest, Money::from_major(50));
        assert_eq!(first.principal, money(dec!(810.66)));
        assert_eq!(first.end_balance, money(dec!(9189.34)));

        // four cents of drift folded into the last row
        let last = schedule.final_row().unwrap();
        assert_eq!(last.due_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(last.end_balance, Money::ZERO);
        assert_eq!(last.principal, money(dec!(856.42)));
        assert_eq!(last.payment, money(dec!(860.70)));

        let interest: Money = schedule.rows.iter().map(|r| r.interest).sum();
        assert_eq!(schedule.total_interest, interest);
        assert_eq!(schedule.total_interest, money(dec!(327.96)));
        assert_eq!(schedule.total_paid, money(dec!(10327.96)));
        assert_eq!(schedule.warnings.len(), 1);
    }

    #[test]
    fn test_balance_chain_holds() {
        let terms = level_terms(Money::from_major(10_000), dec!(0.005), 12, money(dec!(860.66)));
        let schedule = simulate(&terms).unwrap();

        let mut previous = terms.present_value;
        for row in &schedule.rows {
            assert_eq!(row.end_balance, (previous - row.principal - row.extra).max(Money::ZERO));
            previous = row.end_balance;
        }
    }

    #[test]
    fn test_one_cent_cleanup_without_warning() {
        // 1000 over 3 at zero rate leaves one cent
        let terms = level_terms(Money::from_major(1_000), dec!(0), 3, money(dec!(333.33)));
        let schedule = simulate(&terms).unwrap();

        assert_eq!(schedule.rows.len(), 3);
        let last = schedule.final_row().unwrap();
        assert_eq!(last.principal, money(dec!(333.34)));
        assert_eq!(last.payment, money(dec!(333.34)));
        assert_eq!(last.end_balance, Money::ZERO);
        assert_eq!(schedule.total_paid, Money::from_major(1_000));
        assert!(schedule.warnings.is_empty());
    }

    #[test]
    fn test_extra_and_lump_sum_shorten_schedule() {
        let mut terms = level_terms(Money::from_major(10_000), dec!(0.005), 12, money(dec!(860.66)));
        terms.extra_per_period = Money::from_major(100);
        terms.lump_sum = Money::from_major(1_000);

        let schedule = simulate(&terms).unwrap();
        assert_eq!(schedule.rows.len(), 10);

        let first = &schedule.rows[0];
        assert_eq!(first.extra, Money::from_major(1_100));
        assert_eq!(schedule.rows[1].extra, Money::from_major(100));

        // final period is capped by the remaining balance
        let last = schedule.final_row().unwrap();
        assert_eq!(last.end_balance, Money::ZERO);
        assert!(last.principal + last.extra < last.payment + Money::from_major(100));
        assert_eq!(schedule.total_interest, money(dec!(246.43)));
        assert!(schedule.warnings.is_empty());
    }

    #[test]
    fn test_escrow_counts_toward_cash_paid() {
        let mut terms = level_terms(Money::from_major(1_200), dec!(0), 12, Money::from_major(100));
        terms.escrow = Money::from_major(25);

        let schedule = simulate(&terms).unwrap();
        assert_eq!(schedule.rows.len(), 12);
        assert!(schedule.rows.iter().all(|r| r.escrow == Money::from_major(25)));
        assert_eq!(schedule.total_paid, Money::from_major(1_500));
        assert_eq!(schedule.total_interest, Money::ZERO);
    }

    #[test]
    fn test_underpaying_installment_fails_to_converge() {
        // payment one cent above interest cannot retire the balance in term
        let terms = level_terms(Money::from_major(100_000), dec!(0.02), 24, money(dec!(2000.01)));
        let err = simulate(&terms).unwrap_err();

        match err {
            LoanError::NonConvergence { periods, remaining_balance } => {
                assert_eq!(periods, 24);
                assert!(remaining_balance > Money::from_major(99_000));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_constant_principal_schedule() {
        let mut terms = level_terms(Money::from_major(1_200), dec!(0.01), 12, Money::ZERO);
        terms.installment = Installment::ConstantPrincipal { principal: Money::from_major(100) };

        let schedule = simulate(&terms).unwrap();
        assert_eq!(schedule.rows.len(), 12);
        assert_eq!(schedule.rows[0].interest, Money::from_major(12));
        assert_eq!(schedule.rows[0].payment, Money::from_major(112));
        assert_eq!(schedule.rows[11].interest, Money::from_major(1));
        assert_eq!(schedule.rows[11].payment, Money::from_major(101));

        // interest declines every period
        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
        }
        assert_eq!(schedule.total_interest, Money::from_major(78));
    }

    #[test]
    fn test_state_steps_through_phases() {
        let terms = level_terms(Money::from_major(200), dec!(0), 2, Money::from_major(100));
        let state = SimulationState::new(&terms);
        assert_eq!(state.phase, SimulationPhase::Accruing);
        assert!(state.can_step(&terms));

        let state = state.step(&terms).unwrap();
        assert_eq!(state.phase, SimulationPhase::Accruing);
        assert_eq!(state.balance, Money::from_major(100));

        let state = state.step(&terms).unwrap();
        assert_eq!(state.phase, SimulationPhase::Settled);
        assert!(!state.can_step(&terms));
    }

    #[test]
    fn test_due_dates_step_from_previous_due_date() {
        let mut terms = level_terms(Money::from_major(10_000), dec!(0.005), 4, money(dec!(2531.33)));
        terms.start_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let schedule = simulate(&terms).unwrap();
        let dates: Vec<NaiveDate> = schedule.rows.iter().map(|r| r.due_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 29).unwrap(),
            ]
        );
    }

    #[test]
    fn test_running_total_overflow_is_an_error() {
        let pv: Money = "70000000000000000000000000000".parse().unwrap();
        let mut terms = level_terms(pv, dec!(0), 2, "40000000000000000000000000000".parse().unwrap());
        terms.escrow = "10000000000000000000000000000".parse().unwrap();

        let err = simulate(&terms).unwrap_err();
        assert!(matches!(err, LoanError::Calculation { .. }));
    }

    #[test]
    fn test_get_payment_is_one_based() {
        let terms = level_terms(Money::from_major(200), dec!(0), 2, Money::from_major(100));
        let schedule = simulate(&terms).unwrap();

        assert!(schedule.get_payment(0).is_none());
        assert_eq!(schedule.get_payment(1).unwrap().period, 1);
        assert_eq!(schedule.get_payment(2).unwrap().period, 2);
        assert!(schedule.get_payment(3).is_none());
    }
}
