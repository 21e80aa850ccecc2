use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::decimal::significant;
use crate::errors::{LoanError, Result};

/// integer power by square-and-multiply, each product held at 20 significant digits
///
/// returns `None` when the result leaves the decimal range
pub fn checked_powi(base: Decimal, exponent: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut factor = base;
    let mut remaining = exponent;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = significant(result.checked_mul(factor)?);
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = significant(factor.checked_mul(factor)?);
        }
    }

    Some(result)
}

/// discount factor `base^-n`
///
/// when `base^n` overflows, its reciprocal is below the 20 digit
/// resolution and is taken as zero
pub fn discount_factor(base: Decimal, periods: u32) -> Result<Decimal> {
    if base <= Decimal::ZERO {
        return Err(LoanError::Calculation {
            message: format!("discount base must be positive, got {}", base),
        });
    }

    match checked_powi(base, periods) {
        Some(growth) if growth >= Decimal::ONE => Ok(significant(Decimal::ONE / growth)),
        Some(growth) => Decimal::ONE
            .checked_div(growth)
            .map(significant)
            .ok_or_else(|| LoanError::overflow("discount factor")),
        None if base > Decimal::ONE => Ok(Decimal::ZERO),
        None => Err(LoanError::overflow("discount factor")),
    }
}

/// future value of one unit paid every period, `((1 + r)^n - 1) / r`
///
/// `n` at a zero rate; `None` when the growth leaves the decimal range
pub fn future_value_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    if rate.is_zero() {
        return Some(Decimal::from(periods));
    }

    let growth = checked_powi(significant(Decimal::ONE + rate), periods)?;
    significant(growth - Decimal::ONE)
        .checked_div(rate)
        .map(significant)
}

/// fractional power through an f64 intermediate
///
/// only the exponentiation runs in binary floating point; the result is
/// brought back to 20 significant digits
pub fn powf_approx(base: Decimal, exponent: f64) -> Result<Decimal> {
    let b = base
        .to_f64()
        .ok_or_else(|| LoanError::overflow("fractional power base"))?;
    let value = b.powf(exponent);

    Decimal::from_f64_retain(value)
        .or_else(|| Decimal::from_f64(value))
        .map(significant)
        .ok_or_else(|| LoanError::overflow("fractional power"))
}
