use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::{AmortizationMethod, Compounding, PaymentFrequency, RoundingPolicy};

/// largest accepted monetary input, in whole currency units
pub const MAX_AMOUNT_MAJOR: i64 = 1_000_000_000_000_000;

/// origination and closing fees
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeTerms {
    /// when true the fees are added to the amortized balance,
    /// otherwise they are paid up front
    pub financed: bool,
    pub origination: Money,
    pub closing: Money,
}

impl FeeTerms {
    pub fn total(&self) -> Money {
        self.origination + self.closing
    }
}

/// escrow collected with every payment (taxes, insurance)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowTerms {
    pub enabled: bool,
    pub per_period: Money,
}

impl EscrowTerms {
    /// escrow charged each period, zero when disabled
    pub fn amount(&self) -> Money {
        if self.enabled {
            self.per_period
        } else {
            Money::ZERO
        }
    }
}

/// loan parameters supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// annual rate as a percentage, 6.5 for 6.5%
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub extra_per_period: Money,
    /// one-time extra applied with the first payment
    #[serde(default)]
    pub lump_sum_extra: Money,
    #[serde(default)]
    pub fees: FeeTerms,
    #[serde(default)]
    pub escrow: EscrowTerms,
    #[serde(default)]
    pub compounding: Compounding,
    #[serde(default)]
    pub rounding: RoundingPolicy,
    #[serde(default)]
    pub method: AmortizationMethod,
}

impl LoanInput {
    pub fn builder() -> LoanInputBuilder {
        LoanInputBuilder::new()
    }

    /// parse from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoanError::invalid("input", e.to_string()))
    }

    /// read and parse a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// check field ranges
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LoanError::invalid(
                "principal",
                format!("must be greater than zero, got {}", self.principal),
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LoanError::invalid(
                "annual_rate_percent",
                format!("must not be negative, got {}", self.annual_rate_percent),
            ));
        }
        if self.term_months == 0 {
            return Err(LoanError::invalid("term_months", "must be greater than zero"));
        }

        let amounts = [
            ("principal", self.principal),
            ("extra_per_period", self.extra_per_period),
            ("lump_sum_extra", self.lump_sum_extra),
            ("fees.origination", self.fees.origination),
            ("fees.closing", self.fees.closing),
            ("escrow.per_period", self.escrow.per_period),
        ];
        let max = Money::from_major(MAX_AMOUNT_MAJOR);
        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(LoanError::invalid(
                    field,
                    format!("must not be negative, got {}", amount),
                ));
            }
            if amount > max {
                return Err(LoanError::invalid(
                    field,
                    format!("must not exceed {}, got {}", max, amount),
                ));
            }
        }

        Ok(())
    }

    /// copy with every monetary amount rounded to cents, validated
    pub fn normalized(&self) -> Result<Self> {
        let policy = self.rounding;
        let normalized = Self {
            principal: self.principal.round(policy),
            extra_per_period: self.extra_per_period.round(policy),
            lump_sum_extra: self.lump_sum_extra.round(policy),
            fees: FeeTerms {
                financed: self.fees.financed,
                origination: self.fees.origination.round(policy),
                closing: self.fees.closing.round(policy),
            },
            escrow: EscrowTerms {
                enabled: self.escrow.enabled,
                per_period: self.escrow.per_period.round(policy),
            },
            ..self.clone()
        };

        normalized.validate()?;
        Ok(normalized)
    }

    /// balance the schedule amortizes, principal plus any financed fees
    pub fn present_value(&self) -> Money {
        if self.fees.financed {
            self.principal + self.fees.total()
        } else {
            self.principal
        }
    }

    /// fees paid up front rather than through the schedule
    pub fn upfront_fees(&self) -> Money {
        if self.fees.financed {
            Money::ZERO
        } else {
            self.fees.total()
        }
    }

    /// nominal number of payment periods in the term
    pub fn period_count(&self) -> u32 {
        self.frequency.periods_for_term(self.term_months)
    }
}

/// builder for loan inputs
#[derive(Debug, Clone, Default)]
pub struct LoanInputBuilder {
    principal: Option<Money>,
    annual_rate_percent: Option<Decimal>,
    term_months: Option<u32>,
    frequency: PaymentFrequency,
    start_date: Option<NaiveDate>,
    extra_per_period: Money,
    lump_sum_extra: Money,
    fees: FeeTerms,
    escrow: EscrowTerms,
    compounding: Compounding,
    rounding: RoundingPolicy,
    method: AmortizationMethod,
}

impl LoanInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn annual_rate_percent(mut self, rate: Decimal) -> Self {
        self.annual_rate_percent = Some(rate);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn extra_per_period(mut self, amount: Money) -> Self {
        self.extra_per_period = amount;
        self
    }

    pub fn lump_sum_extra(mut self, amount: Money) -> Self {
        self.lump_sum_extra = amount;
        self
    }

    pub fn origination_fee(mut self, amount: Money) -> Self {
        self.fees.origination = amount;
        self
    }

    pub fn closing_fee(mut self, amount: Money) -> Self {
        self.fees.closing = amount;
        self
    }

    pub fn finance_fees(mut self, financed: bool) -> Self {
        self.fees.financed = financed;
        self
    }

    /// enable escrow at the given amount per period
    pub fn escrow_per_period(mut self, amount: Money) -> Self {
        self.escrow = EscrowTerms {
            enabled: true,
            per_period: amount,
        };
        self
    }

    pub fn compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    pub fn rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn method(mut self, method: AmortizationMethod) -> Self {
        self.method = method;
        self
    }

    /// build and validate; required fields have no defaults
    pub fn build(self) -> Result<LoanInput> {
        let principal = self
            .principal
            .ok_or_else(|| LoanError::invalid("principal", "required"))?;
        let annual_rate_percent = self
            .annual_rate_percent
            .ok_or_else(|| LoanError::invalid("annual_rate_percent", "required"))?;
        let term_months = self
            .term_months
            .ok_or_else(|| LoanError::invalid("term_months", "required"))?;
        let start_date = self
            .start_date
            .ok_or_else(|| LoanError::invalid("start_date", "required"))?;

        let input = LoanInput {
            principal,
            annual_rate_percent,
            term_months,
            frequency: self.frequency,
            start_date,
            extra_per_period: self.extra_per_period,
            lump_sum_extra: self.lump_sum_extra,
            fees: self.fees,
            escrow: self.escrow,
            compounding: self.compounding,
            rounding: self.rounding,
            method: self.method,
        };

        input.validate()?;
        Ok(input)
    }
}
