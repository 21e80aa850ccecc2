use rust_decimal::Decimal;

use crate::decimal::{significant, Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::discount_factor;
use crate::types::RoundingPolicy;
use crate::warnings::{Warning, WarningLog};

/// scale the payment quotient is held at before rounding to cents
const QUOTIENT_SCALE: u32 = 10;

/// solved periodic payment plus anything worth telling the caller
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSolution {
    pub payment: Money,
    pub warnings: WarningLog,
}

/// level payment that amortizes `present_value` over `periods` at `rate`
///
/// `P = r * PV / (1 - (1 + r)^-n)`, or `PV / n` at a zero rate. when the
/// rounded payment does not exceed the rounded first-period interest it is
/// raised to that interest plus one cent and a warning is recorded
pub fn base_payment(
    present_value: Money,
    rate: Rate,
    periods: u32,
    policy: RoundingPolicy,
) -> Result<PaymentSolution> {
    if periods == 0 {
        return Err(LoanError::invalid("period_count", "must be greater than zero"));
    }

    let mut warnings = WarningLog::new();

    if rate.is_zero() {
        let payment = (present_value / Decimal::from(periods)).round(policy);
        return Ok(PaymentSolution { payment, warnings });
    }

    let r = rate.as_decimal();
    let pv = present_value.as_decimal();

    let discount = discount_factor(significant(Decimal::ONE + r), periods)?;
    let denominator = significant(Decimal::ONE - discount);
    if denominator.is_zero() {
        return Err(LoanError::Calculation {
            message: format!("annuity factor vanished for rate {} over {} periods", rate, periods),
        });
    }

    let numerator = r
        .checked_mul(pv)
        .map(significant)
        .ok_or_else(|| LoanError::overflow("level payment"))?;
    let quotient = numerator
        .checked_div(denominator)
        .ok_or_else(|| LoanError::overflow("level payment"))?;

    let mut payment = Money::from_decimal(quotient)
        .round_dp(QUOTIENT_SCALE, policy)
        .round(policy);

    let first_interest = rate.interest_on(present_value, policy)?;
    if payment <= first_interest {
        let adjusted = first_interest
            .checked_add(Money::CENT)
            .ok_or_else(|| LoanError::overflow("adjusted payment"))?;
        warnings.record(Warning::NegativeAmortizationAdjusted {
            original_payment: payment,
            adjusted_payment: adjusted,
        });
        payment = adjusted;
    }

    Ok(PaymentSolution { payment, warnings })
}

/// equal principal installment for the constant-principal method
pub fn constant_principal_installment(
    present_value: Money,
    periods: u32,
    policy: RoundingPolicy,
) -> Result<Money> {
    if periods == 0 {
        return Err(LoanError::invalid("period_count", "must be greater than zero"));
    }

    Ok((present_value / Decimal::from(periods)).round(policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(d: Decimal) -> Money {
        Money::from_decimal(d)
    }

    #[test]
    fn test_level_payment() {
        let solution = base_payment(
            Money::from_major(10_000),
            Rate::from_decimal(dec!(0.005)),
            12,
            RoundingPolicy::HalfUp,
        )
        .unwrap();

        assert_eq!(solution.payment, money(dec!(860.66)));
        assert!(solution.warnings.is_empty());
    }

    #[test]
    fn test_thirty_year_mortgage_payment() {
        let solution = base_payment(
            Money::from_major(300_000),
            Rate::from_decimal(dec!(0.0054166666666666666700)),
            360,
            RoundingPolicy::HalfUp,
        )
        .unwrap();

        assert_eq!(solution.payment, money(dec!(1896.20)));
    }

    #[test]
    fn test_zero_rate_payment() {
        let solution = base_payment(Money::from_major(1_000), Rate::ZERO, 3, RoundingPolicy::HalfUp).unwrap();
        assert_eq!(solution.payment, money(dec!(333.33)));

        let solution = base_payment(Money::from_major(1_200), Rate::ZERO, 12, RoundingPolicy::HalfUp).unwrap();
        assert_eq!(solution.payment, Money::from_major(100));
        assert!(solution.warnings.is_empty());
    }

    #[test]
    fn test_negative_amortization_guard() {
        // 24% annual is 2% a month; over 1200 periods the annuity payment
        // rounds to exactly the first month's interest
        let principal = Money::from_major(100_000);
        let rate = Rate::from_decimal(dec!(0.02));
        let solution = base_payment(principal, rate, 1_200, RoundingPolicy::HalfUp).unwrap();

        let first_interest = rate.interest_on(principal, RoundingPolicy::HalfUp).unwrap();
        assert_eq!(first_interest, Money::from_major(2_000));
        assert!(solution.payment > first_interest);
        assert_eq!(solution.payment, money(dec!(2000.01)));

        let warnings = solution.warnings.into_vec();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            Warning::NegativeAmortizationAdjusted {
                original_payment: Money::from_major(2_000),
                adjusted_payment: money(dec!(2000.01)),
            }
        );
    }

    #[test]
    fn test_guard_survives_overflowing_growth() {
        // growth factor leaves the decimal range; discount collapses to zero
        let solution = base_payment(
            Money::from_major(100_000),
            Rate::from_decimal(dec!(0.5)),
            5_000,
            RoundingPolicy::HalfUp,
        )
        .unwrap();

        assert_eq!(solution.payment, money(dec!(50000.01)));
        assert_eq!(solution.warnings.len(), 1);
    }

    #[test]
    fn test_oversized_payment_is_an_error() {
        let err = base_payment(
            Money::from_major(1_000_000_000_000_000),
            Rate::from_decimal(dec!(100000000000000000)),
            12,
            RoundingPolicy::HalfUp,
        )
        .unwrap_err();
        assert!(matches!(err, LoanError::Calculation { .. }));
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = base_payment(Money::from_major(1_000), Rate::ZERO, 0, RoundingPolicy::HalfUp).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { .. }));
        assert!(constant_principal_installment(Money::from_major(1_000), 0, RoundingPolicy::HalfUp).is_err());
    }

    #[test]
    fn test_constant_principal_installment() {
        let installment =
            constant_principal_installment(Money::from_major(10_000), 12, RoundingPolicy::HalfUp).unwrap();
        assert_eq!(installment, money(dec!(833.33)));
    }
}
