use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::decimal::{significant, Rate};
use crate::errors::{LoanError, Result};
use crate::types::Compounding;

use super::compound::powf_approx;

const PERCENT_SCALE: u32 = 12;
const RATE_SCALE: u32 = 20;

fn divide(numerator: Decimal, denominator: Decimal, scale: u32) -> Decimal {
    (numerator / denominator).round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// converts an annual percentage rate into the rate of one payment period
pub fn periodic_rate(
    annual_rate_percent: Decimal,
    periods_per_year: u32,
    compounding: Compounding,
) -> Result<Rate> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            format!("must not be negative, got {}", annual_rate_percent),
        ));
    }
    if periods_per_year == 0 {
        return Err(LoanError::invalid("periods_per_year", "must be greater than zero"));
    }

    let annual = divide(annual_rate_percent, Decimal::ONE_HUNDRED, PERCENT_SCALE);
    if annual.is_zero() {
        return Ok(Rate::ZERO);
    }

    let ppy = Decimal::from(periods_per_year);

    let rate = match compounding {
        Compounding::NominalMonthly => {
            // linear rescale of the monthly rate, not a re-compounding
            let monthly = divide(annual, dec!(12), RATE_SCALE);
            let factor = divide(dec!(12), ppy, RATE_SCALE);
            significant(monthly * factor)
        }
        Compounding::NominalDaily => {
            let daily = divide(annual, dec!(365), RATE_SCALE);
            let growth = powf_approx(significant(Decimal::ONE + daily), 365.0 / periods_per_year as f64)?;
            significant(growth - Decimal::ONE)
        }
        Compounding::EffectiveAnnual => {
            let growth = powf_approx(significant(Decimal::ONE + annual), 1.0 / periods_per_year as f64)?;
            significant(growth - Decimal::ONE)
        }
    };

    Ok(Rate::from_decimal(rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_monthly() {
        let rate = periodic_rate(dec!(6), 12, Compounding::NominalMonthly).unwrap();
        assert_eq!(rate.as_decimal(), dec!(0.005));

        let rate = periodic_rate(dec!(6.5), 12, Compounding::NominalMonthly).unwrap();
        assert_eq!(rate.as_decimal(), dec!(0.0054166666666666666700));
    }

    #[test]
    fn test_nominal_monthly_scales_linearly() {
        // 6% nominal monthly over 26 periods is 0.005 * 12 / 26
        let rate = periodic_rate(dec!(6), 26, Compounding::NominalMonthly).unwrap();
        assert_eq!(rate.as_decimal(), dec!(0.0023076923076923076923));

        let weekly = periodic_rate(dec!(6), 52, Compounding::NominalMonthly).unwrap();
        assert_eq!(weekly.as_decimal(), dec!(0.0011538461538461538462));
    }

    #[test]
    fn test_nominal_daily_exceeds_nominal_monthly() {
        let daily = periodic_rate(dec!(6.5), 12, Compounding::NominalDaily).unwrap();
        let monthly = periodic_rate(dec!(6.5), 12, Compounding::NominalMonthly).unwrap();
        assert!(daily > monthly);
        assert!((daily.as_decimal() - dec!(0.00543087846)).abs() < dec!(0.00000000001));
    }

    #[test]
    fn test_effective_annual() {
        let rate = periodic_rate(dec!(12), 12, Compounding::EffectiveAnnual).unwrap();
        // 1.12^(1/12) - 1
        assert!((rate.as_decimal() - dec!(0.0094887929)).abs() < dec!(0.0000000001));

        let annual = periodic_rate(dec!(12), 1, Compounding::EffectiveAnnual).unwrap();
        assert!((annual.as_decimal() - dec!(0.12)).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_zero_rate() {
        for compounding in [
            Compounding::NominalMonthly,
            Compounding::NominalDaily,
            Compounding::EffectiveAnnual,
        ] {
            let rate = periodic_rate(Decimal::ZERO, 26, compounding).unwrap();
            assert!(rate.is_zero());
        }
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = periodic_rate(dec!(-1), 12, Compounding::NominalMonthly).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { .. }));

        assert!(periodic_rate(dec!(5), 0, Compounding::NominalMonthly).is_err());
    }
}
